//! Core engine: scores a change, gathers advisory output and optional
//! enrichment, then applies the precedence rules that build the response.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::advisory;
use crate::config::Config;
use crate::enrichment::{self, Enricher, NoopEnricher};
use crate::risk;
use crate::suggestion;
use crate::types::*;

/// The gatekeeper engine. Stateless: every call is evaluated independently,
/// so one instance can be shared across concurrent requests.
#[derive(Clone)]
pub struct Engine {
  enricher: Arc<dyn Enricher>,
}

impl Engine {
  pub fn new(enricher: Arc<dyn Enricher>) -> Self {
    Self { enricher }
  }

  /// Rule-based only; no enrichment calls are ever made.
  pub fn rule_based() -> Self {
    Self::new(Arc::new(NoopEnricher))
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(enrichment::from_config(config))
  }

  pub fn enrichment_enabled(&self) -> bool {
    self.enricher.is_enabled()
  }

  /// Analyze one change, stamped with the current time.
  pub async fn analyze(&self, req: &ChangeRequest) -> AnalysisResult {
    self.analyze_at(req, Utc::now().timestamp_millis()).await
  }

  /// Analyze one change with an explicit timestamp (Unix epoch milliseconds).
  pub async fn analyze_at(&self, req: &ChangeRequest, analysis_timestamp: i64) -> AnalysisResult {
    let risk_score = risk::compute_risk(&req.diff, &req.files);
    let decision = risk::classify(risk_score, &req.files);
    let findings = advisory::find_missing_tests(&req.diff, &req.files);
    let rule_code = suggestion::classify(decision, risk_score, &req.files, &req.diff);
    debug!(
      pr = %req.id,
      risk = risk_score,
      decision = %decision,
      findings = findings.len(),
      rule_code = %rule_code,
      "rule evaluation complete"
    );

    let enabled = self.enricher.is_enabled();

    let suggested_tests = if enabled {
      self.enricher.test_recommendations(req).await
    } else {
      advisory::suggest_tests(&findings)
    };

    let explanation = match self.enricher.explanation(decision, risk_score, req).await {
      Some(text) => text,
      None => advisory::explain(risk_score, &req.files),
    };

    let spelling_suggestions = if enabled {
      self.enricher.spelling_suggestions(&req.diff).await
    } else {
      Vec::new()
    };

    let mut suggestion_code = self
      .enricher
      .suggestion_code(decision, risk_score, req)
      .filter(|code| code.decision() == decision)
      .unwrap_or(rule_code);

    // Spelling findings take display priority over the secondary suggestion.
    let enrichment_suggestion = if spelling_suggestions.is_empty() {
      self
        .enricher
        .suggestion_description(suggestion_code, &explanation)
        .await
    } else {
      None
    };

    if !spelling_suggestions.is_empty() && decision != Decision::Block {
      suggestion_code = SuggestionCode::WarnSpellingErrors;
    }

    info!(
      pr = %req.id,
      risk = risk_score,
      decision = %decision,
      code = %suggestion_code,
      enriched = enabled,
      "analysis complete"
    );

    AnalysisResult {
      pr_number: req.id.clone(),
      risk_score,
      risk_level: RiskLevel::from_score(risk_score),
      decision,
      pr_status: decision.status(risk_score).to_string(),
      missing_tests: findings.iter().map(ToString::to_string).collect(),
      suggested_tests,
      summary: advisory::summary(req),
      explanation,
      suggestion_code,
      spelling_suggestions,
      enrichment_suggestion,
      error_message: None,
      analysis_timestamp,
    }
  }
}
