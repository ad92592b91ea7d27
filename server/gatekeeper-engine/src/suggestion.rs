//! Suggestion code classification: rule-based and enrichment variants (first matching rule wins).

use crate::types::{Decision, SuggestionCode};

const CREDENTIAL_TOKENS: &[&str] = &["password", "secret", "apikey"];
const EXEC_TOKENS: &[&str] = &["runtime.exec", "system.exit"];
const CONFIG_SUFFIXES: &[&str] = &["properties", "yml", "yaml", "xml", "config"];
const BUILD_MARKERS: &[&str] = &["pom", "gradle", "build", "docker", "kubernetes"];

fn any_file(files: &[String], pred: impl Fn(&str) -> bool) -> bool {
  files.iter().any(|f| pred(&f.to_lowercase()))
}

pub fn has_config_file(files: &[String]) -> bool {
  any_file(files, |p| CONFIG_SUFFIXES.iter().any(|s| p.ends_with(s)))
}

pub fn has_build_file(files: &[String]) -> bool {
  any_file(files, |p| BUILD_MARKERS.iter().any(|m| p.contains(m)))
}

/// Suggestion code for a decision; the prefix always matches `decision`.
pub fn classify(decision: Decision, risk: f64, files: &[String], diff: &str) -> SuggestionCode {
  match decision {
    Decision::Block => {
      if risk >= 0.9 {
        return SuggestionCode::BlockCriticalSecurity;
      }
      if risk >= 0.8 {
        let lower = diff.to_lowercase();
        if CREDENTIAL_TOKENS.iter().any(|t| lower.contains(t)) {
          return SuggestionCode::BlockCredentialExposure;
        }
        if EXEC_TOKENS.iter().any(|t| lower.contains(t)) {
          return SuggestionCode::BlockDangerousExec;
        }
        return SuggestionCode::BlockHighSecurityRisk;
      }
      SuggestionCode::BlockDangerousOperations
    }
    Decision::Warn => {
      if risk >= 0.5 {
        if has_config_file(files) {
          return SuggestionCode::WarnConfigChangesReview;
        }
        return SuggestionCode::WarnModerateRiskReview;
      }
      if risk >= 0.4 {
        if has_build_file(files) {
          return SuggestionCode::WarnBuildConfigChanges;
        }
        return SuggestionCode::WarnConfigChangesReview;
      }
      SuggestionCode::WarnEnhancedTestingNeeded
    }
    Decision::Allow => {
      if risk >= 0.1 {
        SuggestionCode::AllowWithTestingRequired
      } else {
        SuggestionCode::AllowLowRiskSafe
      }
    }
  }
}

/// Context-aware variant used when enrichment is configured: specific diff
/// patterns outrank the risk bands. Same taxonomy, prefix still matches `decision`.
pub fn classify_enriched(
  decision: Decision,
  risk: f64,
  files: &[String],
  diff: &str,
) -> SuggestionCode {
  match decision {
    Decision::Block => {
      let lower = diff.to_lowercase();
      if CREDENTIAL_TOKENS.iter().any(|t| lower.contains(t)) {
        return SuggestionCode::BlockCredentialExposure;
      }
      if EXEC_TOKENS.iter().any(|t| lower.contains(t)) {
        return SuggestionCode::BlockDangerousExec;
      }
      if risk >= 0.9 {
        return SuggestionCode::BlockCriticalSecurity;
      }
      if risk >= 0.8 {
        return SuggestionCode::BlockHighSecurityRisk;
      }
      SuggestionCode::BlockDangerousOperations
    }
    Decision::Warn => {
      if has_build_file(files) {
        return SuggestionCode::WarnBuildConfigChanges;
      }
      if has_config_file(files) {
        return SuggestionCode::WarnConfigChangesReview;
      }
      if risk >= 0.5 {
        return SuggestionCode::WarnModerateRiskReview;
      }
      SuggestionCode::WarnEnhancedTestingNeeded
    }
    Decision::Allow => classify(decision, risk, files, diff),
  }
}
