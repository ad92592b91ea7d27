//! Binary entrypoint for the gatekeeper API.

use std::sync::Arc;

use gatekeeper_api::{router, AppState, ServerConfig};
use gatekeeper_engine::Engine;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = ServerConfig::from_env()?;
  let engine = Engine::from_config(&config.engine);
  info!(
    enrichment = engine.enrichment_enabled(),
    auth = config.api_key.is_some(),
    "gatekeeper engine ready"
  );

  let state = Arc::new(AppState::new(engine, config.api_key.clone()));
  let app = router(state);

  info!("gatekeeper-api listening on http://{}", config.addr);
  let listener = tokio::net::TcpListener::bind(config.addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
