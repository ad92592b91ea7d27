//! Binary entrypoint: read one analyze request JSON from stdin, write the result to stdout.
//!
//! Logs go to stderr so stdout stays a single JSON object.

use gatekeeper_engine::{AnalyzeRequest, ChangeRequest, Config, Engine};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary().await {
    let _ = writeln!(io::stderr(), "gatekeeper-engine error: {}", e);
    std::process::exit(1);
  }
}

async fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::from_env()?;
  let engine = Engine::from_config(&config);

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: AnalyzeRequest = serde_json::from_str(&raw)?;

  let out = engine.analyze(&ChangeRequest::from(input)).await;
  let json = serde_json::to_vec(&out)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
