//! # Axum Helpers
//!
//! Utilities and middleware shared by the HTTP surface of the task service.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError` and the `{"error": <message>}` response body
//! - **[`extractors`]**: JSON extractor with `validator`-based validation
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export HTTP middleware
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export server types
pub use server::{
    close_postgres, create_app, create_production_app, create_router, health_router,
    shutdown_signal, HealthResponse, ShutdownCoordinator,
};
