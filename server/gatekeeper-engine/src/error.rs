//! Structured error types for the gatekeeper engine.
//!
//! None of these reach the caller of `Engine::analyze`: enrichment errors are
//! logged and replaced by the rule-based result, config errors stop start-up.

use thiserror::Error;

/// A single failed call to the completion backend.
#[derive(Debug, Error)]
pub enum EnrichmentError {
  #[error("http: {0}")]
  Http(#[from] reqwest::Error),

  #[error("status {status}: {body}")]
  Status { status: u16, body: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("empty completion")]
  Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config: {var}: {reason}")]
  Invalid { var: String, reason: String },
}

impl ConfigError {
  pub fn invalid(var: &str, reason: impl Into<String>) -> Self {
    Self::Invalid {
      var: var.to_string(),
      reason: reason.into(),
    }
  }
}
