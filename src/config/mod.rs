//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Paging limits applied to collection queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Requested page sizes above this are silently clamped
    pub max_page_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self { max_page_size: 20 }
    }
}

/// Complete configuration for the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Paging limits
    pub paging: PagingConfig,

    /// Route-name -> URI-template overrides, merged over the built-in route
    /// table (e.g. to mount the API under a different prefix)
    pub routes: HashMap<String, String>,
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.paging.max_page_size, 20);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
            paging:
                max_page_size: 50
            routes:
                get_authors: /v2/authors
        "#;

        let config = ApiConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.paging.max_page_size, 50);
        assert_eq!(config.routes["get_authors"], "/v2/authors");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ApiConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = ApiConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.paging.max_page_size, config.paging.max_page_size);
    }
}
