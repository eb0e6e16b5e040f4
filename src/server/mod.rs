//! HTTP server boundary: state, handlers, router, builder

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::{ServerBuilder, library_registry};
pub use handlers::AppState;
pub use router::build_router;
