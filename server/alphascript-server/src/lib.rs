//! AlphaScript Server - clinical documentation API
//!
//! HTTP surface of the AlphaScript Engine: report generation through
//! OpenAI, Groq or Anthropic with local fallback text, audio processing,
//! recorder sessions, and patient, recording, report and template records.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use error::*;
pub use server::AlphaScriptServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: AlphaScriptServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_timing_middleware))
                .layer(from_fn(middleware::audit_logging_middleware)),
        )
        .with_state(server)
}
