//! Optional LLM enrichment behind a capability trait.
//!
//! Production code picks `LlmEnricher<GroqClient>` when a credential is
//! configured and `NoopEnricher` otherwise. Every operation is independently
//! fault-tolerant: a failed call is logged and reported as "no result", so the
//! caller substitutes its rule-based fallback for that one field.

pub mod client;
pub mod parse;
pub mod prompts;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::suggestion;
use crate::types::{ChangeRequest, Decision, SuggestionCode};

pub use client::{Completion, GroqClient};

/// Enrichment capability. Implementations never fail; "no result" is `None` or empty.
#[async_trait]
pub trait Enricher: Send + Sync {
  /// Whether a live backend is configured.
  fn is_enabled(&self) -> bool;

  /// Free-text technical explanation of the change.
  async fn explanation(&self, decision: Decision, risk: f64, req: &ChangeRequest) -> Option<String>;

  /// Short actionable recommendation for a code and explanation.
  async fn suggestion_description(&self, code: SuggestionCode, explanation: &str)
    -> Option<String>;

  /// Context-aware code from `decision`'s bucket. Deterministic, no backend call.
  fn suggestion_code(&self, decision: Decision, risk: f64, req: &ChangeRequest)
    -> Option<SuggestionCode>;

  /// Up to 3 test recommendations.
  async fn test_recommendations(&self, req: &ChangeRequest) -> Vec<String>;

  /// Up to 5 "original -> suggestion" spelling fixes.
  async fn spelling_suggestions(&self, diff: &str) -> Vec<String>;
}

/// Used when no credential is configured: every operation returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEnricher;

#[async_trait]
impl Enricher for NoopEnricher {
  fn is_enabled(&self) -> bool {
    false
  }

  async fn explanation(&self, _: Decision, _: f64, _: &ChangeRequest) -> Option<String> {
    None
  }

  async fn suggestion_description(&self, _: SuggestionCode, _: &str) -> Option<String> {
    None
  }

  fn suggestion_code(&self, _: Decision, _: f64, _: &ChangeRequest) -> Option<SuggestionCode> {
    None
  }

  async fn test_recommendations(&self, _: &ChangeRequest) -> Vec<String> {
    Vec::new()
  }

  async fn spelling_suggestions(&self, _: &str) -> Vec<String> {
    Vec::new()
  }
}

/// Live enricher over any completion backend.
pub struct LlmEnricher<C> {
  backend: C,
}

impl<C: Completion> LlmEnricher<C> {
  pub fn new(backend: C) -> Self {
    Self { backend }
  }

  /// One completion call; failures are logged and become `None`.
  async fn ask(&self, operation: &'static str, prompt: String) -> Option<String> {
    match self.backend.complete(&prompt).await {
      Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
      Ok(_) => {
        debug!(operation, "enrichment returned empty text");
        None
      }
      Err(e) => {
        warn!(operation, error = %e, "enrichment call failed; using rule-based result");
        None
      }
    }
  }
}

#[async_trait]
impl<C: Completion> Enricher for LlmEnricher<C> {
  fn is_enabled(&self) -> bool {
    true
  }

  async fn explanation(&self, decision: Decision, risk: f64, req: &ChangeRequest) -> Option<String> {
    self
      .ask("explanation", prompts::explanation(decision, risk, req))
      .await
  }

  async fn suggestion_description(
    &self,
    code: SuggestionCode,
    explanation: &str,
  ) -> Option<String> {
    self
      .ask(
        "suggestion_description",
        prompts::suggestion_description(code, explanation),
      )
      .await
  }

  fn suggestion_code(
    &self,
    decision: Decision,
    risk: f64,
    req: &ChangeRequest,
  ) -> Option<SuggestionCode> {
    Some(suggestion::classify_enriched(
      decision, risk, &req.files, &req.diff,
    ))
  }

  async fn test_recommendations(&self, req: &ChangeRequest) -> Vec<String> {
    self
      .ask("test_recommendations", prompts::test_recommendations(req))
      .await
      .map(|r| parse::test_recommendations(&r))
      .unwrap_or_default()
  }

  async fn spelling_suggestions(&self, diff: &str) -> Vec<String> {
    if diff.trim().is_empty() {
      return Vec::new();
    }
    self
      .ask("spelling", prompts::spelling(diff))
      .await
      .map(|r| parse::spelling_suggestions(&r))
      .unwrap_or_default()
  }
}

/// Pick the enricher for this configuration.
pub fn from_config(config: &Config) -> Arc<dyn Enricher> {
  let Some(api_key) = config.api_key.as_deref() else {
    return Arc::new(NoopEnricher);
  };
  match GroqClient::new(api_key, config) {
    Ok(client) => Arc::new(LlmEnricher::new(client)),
    Err(e) => {
      warn!(error = %e, "could not build enrichment client; enrichment disabled");
      Arc::new(NoopEnricher)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::EnrichmentError;
  use std::sync::Mutex;

  /// Answers prompts by keyword; records every prompt it sees.
  #[derive(Default)]
  struct ScriptedBackend {
    answers: Vec<(&'static str, Result<&'static str, u16>)>,
    seen: Mutex<Vec<String>>,
  }

  impl ScriptedBackend {
    fn answer(mut self, keyword: &'static str, reply: Result<&'static str, u16>) -> Self {
      self.answers.push((keyword, reply));
      self
    }
  }

  #[async_trait]
  impl Completion for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> Result<String, EnrichmentError> {
      self.seen.lock().unwrap().push(prompt.to_string());
      match self.answers.iter().find(|(k, _)| prompt.contains(k)) {
        Some((_, Ok(text))) => Ok(text.to_string()),
        Some((_, Err(status))) => Err(EnrichmentError::Status {
          status: *status,
          body: "error".into(),
        }),
        None => Err(EnrichmentError::Empty),
      }
    }
  }

  fn req(diff: &str) -> ChangeRequest {
    ChangeRequest::new("9", "carol", vec!["src/App.java".into()], diff)
  }

  #[tokio::test]
  async fn noop_returns_nothing() {
    let e = NoopEnricher;
    assert!(!e.is_enabled());
    assert!(e.explanation(Decision::Allow, 0.0, &req("+ x")).await.is_none());
    assert!(e.spelling_suggestions("+ teh").await.is_empty());
    assert!(e.test_recommendations(&req("+ x")).await.is_empty());
  }

  #[tokio::test]
  async fn failures_degrade_to_no_result() {
    let e = LlmEnricher::new(ScriptedBackend::default().answer("Analyze this PR", Err(500)));
    assert!(e.explanation(Decision::Warn, 0.4, &req("+ x")).await.is_none());
    assert!(e.test_recommendations(&req("+ x")).await.is_empty());
  }

  #[tokio::test]
  async fn responses_are_parsed() {
    let backend = ScriptedBackend::default()
      .answer("test recommendations", Ok("- a\n- b\n- c\n- d"))
      .answer("spelling mistakes", Ok("1. teh -> the"));
    let e = LlmEnricher::new(backend);
    assert_eq!(e.test_recommendations(&req("+ x")).await, vec!["a", "b", "c"]);
    assert_eq!(e.spelling_suggestions("+ teh").await, vec!["teh -> the"]);
  }

  #[test]
  fn live_code_is_deterministic_and_skips_backend() {
    let e = LlmEnricher::new(ScriptedBackend::default());
    let password = req("+ String password = \"x\";");
    assert_eq!(
      e.suggestion_code(Decision::Block, 0.75, &password),
      Some(SuggestionCode::BlockCredentialExposure)
    );
    assert_eq!(NoopEnricher.suggestion_code(Decision::Block, 0.75, &password), None);
    assert!(e.backend.seen.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn blank_diff_skips_spelling_call() {
    let e = LlmEnricher::new(ScriptedBackend::default());
    assert!(e.spelling_suggestions("  ").await.is_empty());
    assert!(e.backend.seen.lock().unwrap().is_empty());
  }

  #[test]
  fn config_without_key_selects_noop() {
    let enricher = from_config(&Config::default());
    assert!(!enricher.is_enabled());
  }

  #[test]
  fn config_with_key_selects_live() {
    let config = Config {
      api_key: Some("gsk_test".into()),
      ..Config::default()
    };
    assert!(from_config(&config).is_enabled());
  }
}
