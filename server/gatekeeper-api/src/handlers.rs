//! HTTP handlers for the gatekeeper API.

use axum::{
  extract::State,
  http::{HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use std::sync::Arc;
use tracing::warn;

use gatekeeper_engine::{suggestion_catalog, AnalyzeRequest, ChangeRequest, SuggestionCodeInfo};

use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn health() -> &'static str {
  "ok"
}

pub async fn analyze(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(payload): Json<AnalyzeRequest>,
) -> Response {
  let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
  if !state.authorized(presented) {
    warn!("analyze: rejected request with missing or wrong API key");
    return StatusCode::UNAUTHORIZED.into_response();
  }

  let req = ChangeRequest::from(payload);
  let result = state.engine.analyze(&req).await;
  Json(result).into_response()
}

pub async fn suggestion_codes() -> Json<Vec<SuggestionCodeInfo>> {
  Json(suggestion_catalog())
}
