#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Request handlers.
pub mod api;

/// Command line and environment configuration.
pub mod config;

/// Cross-origin middleware.
pub mod cors;

/// Error types for the HTTP api.
pub mod error;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

pub use crate::config::{ServeArgs, ServeConfig};
pub use crate::error::ApiError;

/// Build the application router.
///
/// # Arguments
///
/// * `config` - The resolved server configuration.
pub fn app(config: &ServeConfig) -> Router {
    let origins = cors::AllowedOrigins::new(config.allowed_origins.iter().cloned());

    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/denoise", post(api::denoise_image))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()))
        .layer(middleware::from_fn_with_state(origins, cors::cors))
}
