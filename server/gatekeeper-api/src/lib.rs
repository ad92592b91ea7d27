//! Gatekeeper API
//!
//! HTTP service exposing the gatekeeper engine's single decision endpoint.
//! Stateless apart from configuration read at start-up.

mod config;
mod handlers;
mod state;

use axum::{
  routing::{get, post},
  Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use handlers::{analyze, health, suggestion_codes, API_KEY_HEADER};
pub use state::AppState;

/// All routes with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/analyze", post(analyze))
    .route("/api/suggestion-codes", get(suggestion_codes))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
