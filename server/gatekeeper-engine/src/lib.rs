//! Gatekeeper Engine — merge-gating risk scores and decisions for proposed changes.
//!
//! Scores a diff plus its changed file paths, classifies the result as
//! ALLOW / WARN / BLOCK, and attaches missing-test findings, test suggestions,
//! an explanation and a UI suggestion code. An optional LLM enrichment may
//! rewrite the explanation and suggestions; it never changes the score or the
//! decision.
//!
//! Stateless: no DB, nothing kept between requests.

pub mod advisory;
pub mod config;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod risk;
pub mod suggestion;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use enrichment::{Enricher, LlmEnricher, NoopEnricher};
pub use error::{ConfigError, EnrichmentError};
pub use types::{
  suggestion_catalog, AnalysisResult, AnalyzeRequest, ChangeRequest, Decision, RiskLevel,
  SuggestionCode, SuggestionCodeInfo,
};
