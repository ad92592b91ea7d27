//! Server configuration from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use gatekeeper_engine::{Config as EngineConfig, ConfigError};

#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub addr: SocketAddr,
  pub api_key: Option<String>,
  pub engine: EngineConfig,
}

impl ServerConfig {
  /// Read `HOST`, `PORT`, `GATEKEEPER_API_KEY` and the engine's enrichment variables.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|var| std::env::var(var).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let host: IpAddr = match get("HOST") {
      Some(h) => h
        .parse()
        .map_err(|_| ConfigError::invalid("HOST", "expected an IP address"))?,
      None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    };
    let port: u16 = match get("PORT") {
      Some(p) => p
        .parse()
        .map_err(|_| ConfigError::invalid("PORT", "expected a valid u16"))?,
      None => 8080,
    };

    Ok(Self {
      addr: SocketAddr::new(host, port),
      api_key: get("GATEKEEPER_API_KEY"),
      engine: EngineConfig::from_lookup(&lookup)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_bind_all_interfaces_on_8080() {
    let config = ServerConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
    assert!(config.api_key.is_none());
    assert!(!config.engine.enrichment_enabled());
  }

  #[test]
  fn reads_port_and_secret() {
    let config = ServerConfig::from_lookup(|var| match var {
      "PORT" => Some("9090".into()),
      "HOST" => Some("127.0.0.1".into()),
      "GATEKEEPER_API_KEY" => Some("s3cret".into()),
      "GROQ_API_KEY" => Some("gsk".into()),
      _ => None,
    })
    .unwrap();
    assert_eq!(config.addr.to_string(), "127.0.0.1:9090");
    assert_eq!(config.api_key.as_deref(), Some("s3cret"));
    assert!(config.engine.enrichment_enabled());
  }

  #[test]
  fn invalid_port_is_an_error() {
    let err = ServerConfig::from_lookup(|var| (var == "PORT").then(|| "http".to_string()))
      .unwrap_err();
    assert!(err.to_string().contains("PORT"));
  }
}
