//! Shared application state.

use gatekeeper_engine::Engine;

pub struct AppState {
  pub engine: Engine,
  /// Shared secret expected in `X-API-KEY`; `None` leaves the API open.
  pub api_key: Option<String>,
}

impl AppState {
  pub fn new(engine: Engine, api_key: Option<String>) -> Self {
    let api_key = api_key.filter(|k| !k.trim().is_empty());
    Self { engine, api_key }
  }

  /// True when no secret is configured or `presented` matches it exactly.
  pub fn authorized(&self, presented: Option<&str>) -> bool {
    match &self.api_key {
      None => true,
      Some(required) => presented == Some(required.as_str()),
    }
  }
}
