//! ServerBuilder for assembling the API

use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::core::error::FolioError;
use crate::core::link::{LinkAssembler, RouteTable};
use crate::core::mapping::{MappingRegistry, PropertyMapping, PropertyMappingValue};
use crate::entities::Author;
use crate::models::AuthorDto;
use crate::server::handlers::AppState;
use crate::server::router::build_router;
use crate::storage::LibraryRepository;

/// Property mappings for every shape pair the API sorts on.
///
/// Registered once here, shared immutably afterwards. The `age` alias sorts
/// inversely to its backing `date_of_birth` column, and `name` fans out to
/// the two stored name parts.
pub fn library_registry() -> Result<MappingRegistry, FolioError> {
    let mut mapping = PropertyMapping::new();
    mapping.insert("id", PropertyMappingValue::new(&["id"]));
    mapping.insert("genre", PropertyMappingValue::new(&["genre"]));
    mapping.insert("age", PropertyMappingValue::reversed(&["date_of_birth"]));
    mapping.insert("name", PropertyMappingValue::new(&["first_name", "last_name"]));

    let mut registry = MappingRegistry::new();
    registry.register::<AuthorDto, Author>(mapping)?;
    Ok(registry)
}

/// Builder for creating the API router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_repository(InMemoryLibrary::seeded())
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn LibraryRepository>>,
    config: ApiConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            repository: None,
            config: ApiConfig::default(),
        }
    }

    /// Set the repository (required)
    pub fn with_repository(mut self, repository: impl LibraryRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Override the default configuration
    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble the router: registry and route table are built here, once,
    /// then shared read-only with every request.
    pub fn build(self) -> Result<Router> {
        let repository = self
            .repository
            .ok_or_else(|| anyhow!("a repository is required"))?;

        let registry = Arc::new(library_registry()?);

        let mut routes = RouteTable::library_defaults();
        for (name, template) in &self.config.routes {
            routes.insert(name.clone(), template.clone());
        }
        let routes = Arc::new(routes);

        let state = AppState {
            repository,
            registry,
            links: LinkAssembler::new(routes.clone()),
            routes,
            config: Arc::new(self.config),
        };

        Ok(build_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Build and serve on the given address until the task is cancelled
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", addr);
        axum::serve(listener, app).await?;
        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
