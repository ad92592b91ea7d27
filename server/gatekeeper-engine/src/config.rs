//! Engine configuration with sane defaults, optionally read from the environment.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Settings for the optional LLM enrichment.
#[derive(Debug, Clone)]
pub struct Config {
  /// Completion API credential; `None` disables enrichment entirely.
  pub api_key: Option<String>,
  /// OpenAI-compatible chat-completions endpoint.
  pub api_url: String,
  pub model: String,
  /// Per-completion token cap.
  pub max_tokens: u32,
  /// Per-call timeout; an elapsed timeout counts as a failed call.
  pub timeout: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_key: None,
      api_url: DEFAULT_API_URL.to_string(),
      model: DEFAULT_MODEL.to_string(),
      max_tokens: 150,
      timeout: Duration::from_secs(20),
    }
  }
}

impl Config {
  /// Read `GROQ_API_KEY`, `GROQ_API_URL`, `GROQ_MODEL`, `GROQ_TIMEOUT_SECS`.
  /// Blank values count as unset.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|var| std::env::var(var).ok())
  }

  /// Same as `from_env`, with an injectable variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut config = Self::default();

    config.api_key = get("GROQ_API_KEY");
    if let Some(url) = get("GROQ_API_URL") {
      config.api_url = url;
    }
    if let Some(model) = get("GROQ_MODEL") {
      config.model = model;
    }
    if let Some(secs) = get("GROQ_TIMEOUT_SECS") {
      let secs: u64 = secs
        .parse()
        .map_err(|_| ConfigError::invalid("GROQ_TIMEOUT_SECS", "expected whole seconds"))?;
      config.timeout = Duration::from_secs(secs);
    }
    Ok(config)
  }

  pub fn enrichment_enabled(&self) -> bool {
    self.api_key.is_some()
  }
}
