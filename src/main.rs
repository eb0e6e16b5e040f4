//! Folio API server
//!
//! Serves the seeded in-memory catalog. Set `FOLIO_CONFIG` to a YAML file to
//! override paging limits or route templates, and `FOLIO_ADDR` to change the
//! bind address.

use anyhow::Result;
use folio::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut builder = ServerBuilder::new().with_repository(InMemoryLibrary::seeded());

    if let Ok(path) = std::env::var("FOLIO_CONFIG") {
        tracing::info!("Loading configuration from {}", path);
        builder = builder.with_config(ApiConfig::from_yaml_file(&path)?);
    }

    let addr = std::env::var("FOLIO_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    builder.serve(&addr).await
}
