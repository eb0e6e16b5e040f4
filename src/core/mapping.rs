//! Property mapping registry translating client-facing sort aliases to
//! storage properties
//!
//! The registry is built once at start-up, shared immutably across requests,
//! and keyed by (source shape, destination entity) type pairs. A client alias
//! like `age` can map to a differently named storage property
//! (`date_of_birth`) and flip the sort direction along the way.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use crate::core::error::{ConfigError, FolioError};
use crate::core::sort::Sortable;

/// The storage-side half of a property mapping: one or more destination
/// properties plus a direction-reversal flag
#[derive(Debug, Clone)]
pub struct PropertyMappingValue {
    /// Storage property names, in tie-breaking order
    pub destination_properties: Vec<&'static str>,

    /// When set, the requested sort direction is flipped for every
    /// destination property (a derived field that sorts inversely to its
    /// backing storage field, e.g. age vs. date of birth)
    pub reverse: bool,
}

impl PropertyMappingValue {
    pub fn new(destination_properties: &[&'static str]) -> Self {
        Self {
            destination_properties: destination_properties.to_vec(),
            reverse: false,
        }
    }

    pub fn reversed(destination_properties: &[&'static str]) -> Self {
        Self {
            destination_properties: destination_properties.to_vec(),
            reverse: true,
        }
    }
}

/// Alias -> mapping value dictionary for one shape pair
///
/// Alias lookup is case-insensitive; aliases are stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct PropertyMapping {
    entries: HashMap<String, PropertyMappingValue>,
}

impl PropertyMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias. Later inserts under the same alias replace earlier ones;
    /// uniqueness per shape pair is the caller's concern when building the
    /// dictionary literal.
    pub fn insert(&mut self, alias: &str, value: PropertyMappingValue) {
        self.entries.insert(alias.to_lowercase(), value);
    }

    /// Resolve an alias, case-insensitively
    pub fn resolve(&self, alias: &str) -> Option<&PropertyMappingValue> {
        self.entries.get(&alias.to_lowercase())
    }

    /// Validate an orderBy expression against this mapping.
    ///
    /// Empty or whitespace expressions are valid. Each clause is trimmed and
    /// its direction suffix (anything after the first space) stripped before
    /// the alias is checked.
    pub fn is_valid(&self, order_by: &str) -> bool {
        if order_by.trim().is_empty() {
            return true;
        }

        order_by
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .all(|clause| {
                let alias = clause.split_whitespace().next().unwrap_or(clause);
                self.resolve(alias).is_some()
            })
    }

    fn values(&self) -> impl Iterator<Item = (&String, &PropertyMappingValue)> {
        self.entries.iter()
    }
}

/// Registry of property mappings keyed by (source shape, destination entity)
/// type pairs
///
/// Built once before serving; request handlers only read it.
#[derive(Debug, Default)]
pub struct MappingRegistry {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the mapping for a shape pair.
    ///
    /// Fails when the pair is already registered (no silent overwrite) or
    /// when a destination property does not exist on the storage entity.
    /// Both are start-up defects, so neither is ever re-checked per request.
    pub fn register<S, D>(&mut self, mapping: PropertyMapping) -> Result<(), FolioError>
    where
        S: 'static,
        D: Sortable + 'static,
    {
        for (alias, value) in mapping.values() {
            for property in &value.destination_properties {
                if !D::storage_properties().contains(property) {
                    return Err(FolioError::Config(ConfigError::UnknownDestinationProperty {
                        alias: alias.clone(),
                        property: property.to_string(),
                    }));
                }
            }
        }

        let key = (TypeId::of::<S>(), TypeId::of::<D>());
        if self.mappings.contains_key(&key) {
            return Err(FolioError::Config(ConfigError::DuplicateMapping {
                source: type_name::<S>(),
                destination: type_name::<D>(),
            }));
        }

        self.mappings.insert(key, mapping);
        Ok(())
    }

    /// Look up the mapping for a shape pair.
    ///
    /// A missing mapping is a programming error, never client-correctable.
    pub fn lookup<S, D>(&self) -> Result<&PropertyMapping, FolioError>
    where
        S: 'static,
        D: 'static,
    {
        self.mappings
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .ok_or_else(|| {
                FolioError::Config(ConfigError::MappingNotFound {
                    source: type_name::<S>(),
                    destination: type_name::<D>(),
                })
            })
    }

    /// Validate an orderBy expression for a shape pair.
    ///
    /// `Ok(false)` means bad client input; `Err` means the pair itself was
    /// never registered.
    pub fn valid_sort_for<S, D>(&self, order_by: &str) -> Result<bool, FolioError>
    where
        S: 'static,
        D: 'static,
    {
        Ok(self.lookup::<S, D>()?.is_valid(order_by))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    #[derive(Clone)]
    struct PersonDto;

    #[derive(Clone)]
    struct PersonRow;

    impl Sortable for PersonRow {
        fn storage_properties() -> &'static [&'static str] {
            &["id", "first_name", "last_name", "born_at"]
        }

        fn sort_value(&self, _property: &str) -> FieldValue {
            FieldValue::Null
        }
    }

    fn person_mapping() -> PropertyMapping {
        let mut mapping = PropertyMapping::new();
        mapping.insert("id", PropertyMappingValue::new(&["id"]));
        mapping.insert("name", PropertyMappingValue::new(&["first_name", "last_name"]));
        mapping.insert("age", PropertyMappingValue::reversed(&["born_at"]));
        mapping
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MappingRegistry::new();
        registry
            .register::<PersonDto, PersonRow>(person_mapping())
            .unwrap();

        let mapping = registry.lookup::<PersonDto, PersonRow>().unwrap();
        let value = mapping.resolve("Name").unwrap();
        assert_eq!(value.destination_properties, ["first_name", "last_name"]);
        assert!(!value.reverse);
        assert!(mapping.resolve("age").unwrap().reverse);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = MappingRegistry::new();
        registry
            .register::<PersonDto, PersonRow>(person_mapping())
            .unwrap();

        let err = registry
            .register::<PersonDto, PersonRow>(person_mapping())
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::Config(ConfigError::DuplicateMapping { .. })
        ));
    }

    #[test]
    fn test_unknown_destination_property_fails_at_registration() {
        let mut mapping = person_mapping();
        mapping.insert("broken", PropertyMappingValue::new(&["no_such_column"]));

        let mut registry = MappingRegistry::new();
        let err = registry
            .register::<PersonDto, PersonRow>(mapping)
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::Config(ConfigError::UnknownDestinationProperty { .. })
        ));
    }

    #[test]
    fn test_lookup_missing_pair_is_config_error() {
        let registry = MappingRegistry::new();
        let err = registry.lookup::<PersonDto, PersonRow>().unwrap_err();
        assert!(matches!(
            err,
            FolioError::Config(ConfigError::MappingNotFound { .. })
        ));
    }

    #[test]
    fn test_is_valid_accepts_empty_and_known_aliases() {
        let mapping = person_mapping();
        assert!(mapping.is_valid(""));
        assert!(mapping.is_valid("   "));
        assert!(mapping.is_valid("name"));
        assert!(mapping.is_valid("Name desc, age"));
        assert!(mapping.is_valid(" name asc , id desc "));
    }

    #[test]
    fn test_is_valid_rejects_unknown_alias() {
        let mapping = person_mapping();
        assert!(!mapping.is_valid("unknownXYZ"));
        assert!(!mapping.is_valid("name, unknownXYZ desc"));
    }

    #[test]
    fn test_valid_sort_for() {
        let mut registry = MappingRegistry::new();
        registry
            .register::<PersonDto, PersonRow>(person_mapping())
            .unwrap();

        assert!(registry
            .valid_sort_for::<PersonDto, PersonRow>("name desc")
            .unwrap());
        assert!(!registry
            .valid_sort_for::<PersonDto, PersonRow>("nope")
            .unwrap());
    }
}
