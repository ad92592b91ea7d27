//! Core types for the gatekeeper engine (JSON contracts + internal models).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One analyze request as sent by the webhook relay or dashboard.
/// Every field may be null or missing; unknown fields are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
  #[serde(default)]
  pub pr_number: Option<String>,
  #[serde(default)]
  pub author: Option<String>,
  #[serde(default)]
  pub changed_files: Option<Vec<String>>,
  #[serde(default)]
  pub diff: Option<String>,
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

const UNKNOWN: &str = "unknown";

/// Normalized, immutable view of a proposed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
  pub id: String,
  pub author: String,
  pub files: Vec<String>,
  pub diff: String,
}

impl ChangeRequest {
  pub fn new(
    id: impl Into<String>,
    author: impl Into<String>,
    files: Vec<String>,
    diff: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      author: author.into(),
      files,
      diff: diff.into(),
    }
  }
}

impl From<AnalyzeRequest> for ChangeRequest {
  fn from(raw: AnalyzeRequest) -> Self {
    Self {
      id: raw.pr_number.unwrap_or_else(|| UNKNOWN.to_string()),
      author: raw.author.unwrap_or_else(|| UNKNOWN.to_string()),
      files: raw.changed_files.unwrap_or_default(),
      diff: raw.diff.unwrap_or_default(),
    }
  }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Merge-gating verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
  Allow,
  Warn,
  Block,
}

impl Decision {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Allow => "ALLOW",
      Self::Warn => "WARN",
      Self::Block => "BLOCK",
    }
  }

  /// Status phrase shown next to the PR.
  pub fn status(self, risk: f64) -> &'static str {
    match self {
      Self::Block => "❌ BLOCKED - Manual review required before merge",
      Self::Warn => "⚠️ NEEDS REVIEW - Proceed with caution",
      Self::Allow if risk >= 0.10 => "✅ APPROVED - Additional testing recommended",
      Self::Allow => "✅ APPROVED - Safe to merge",
    }
  }
}

impl fmt::Display for Decision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
  Critical,
  High,
  Medium,
  Low,
  Minimal,
}

impl RiskLevel {
  pub fn from_score(risk: f64) -> Self {
    if risk >= 0.90 {
      Self::Critical
    } else if risk >= 0.75 {
      Self::High
    } else if risk >= 0.35 {
      Self::Medium
    } else if risk >= 0.10 {
      Self::Low
    } else {
      Self::Minimal
    }
  }
}

// ---------------------------------------------------------------------------
// Suggestion code taxonomy
// ---------------------------------------------------------------------------

/// UI category for a decision. The prefix always names the decision bucket,
/// except `WarnSpellingErrors`, which may replace any non-BLOCK code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionCode {
  BlockCriticalSecurity,
  BlockCredentialExposure,
  BlockDangerousExec,
  BlockHighSecurityRisk,
  BlockDangerousOperations,
  WarnModerateRiskReview,
  WarnBuildConfigChanges,
  WarnConfigChangesReview,
  WarnEnhancedTestingNeeded,
  WarnSpellingErrors,
  AllowWithTestingRequired,
  AllowLowRiskSafe,
}

impl SuggestionCode {
  pub const ALL: [SuggestionCode; 12] = [
    Self::BlockCriticalSecurity,
    Self::BlockCredentialExposure,
    Self::BlockDangerousExec,
    Self::BlockHighSecurityRisk,
    Self::BlockDangerousOperations,
    Self::WarnModerateRiskReview,
    Self::WarnBuildConfigChanges,
    Self::WarnConfigChangesReview,
    Self::WarnEnhancedTestingNeeded,
    Self::WarnSpellingErrors,
    Self::AllowWithTestingRequired,
    Self::AllowLowRiskSafe,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::BlockCriticalSecurity => "BLOCK_CRITICAL_SECURITY",
      Self::BlockCredentialExposure => "BLOCK_CREDENTIAL_EXPOSURE",
      Self::BlockDangerousExec => "BLOCK_DANGEROUS_EXEC",
      Self::BlockHighSecurityRisk => "BLOCK_HIGH_SECURITY_RISK",
      Self::BlockDangerousOperations => "BLOCK_DANGEROUS_OPERATIONS",
      Self::WarnModerateRiskReview => "WARN_MODERATE_RISK_REVIEW",
      Self::WarnBuildConfigChanges => "WARN_BUILD_CONFIG_CHANGES",
      Self::WarnConfigChangesReview => "WARN_CONFIG_CHANGES_REVIEW",
      Self::WarnEnhancedTestingNeeded => "WARN_ENHANCED_TESTING_NEEDED",
      Self::WarnSpellingErrors => "WARN_SPELLING_ERRORS",
      Self::AllowWithTestingRequired => "ALLOW_WITH_TESTING_REQUIRED",
      Self::AllowLowRiskSafe => "ALLOW_LOW_RISK_SAFE",
    }
  }

  /// The decision bucket this code belongs to.
  pub fn decision(self) -> Decision {
    match self {
      Self::BlockCriticalSecurity
      | Self::BlockCredentialExposure
      | Self::BlockDangerousExec
      | Self::BlockHighSecurityRisk
      | Self::BlockDangerousOperations => Decision::Block,
      Self::WarnModerateRiskReview
      | Self::WarnBuildConfigChanges
      | Self::WarnConfigChangesReview
      | Self::WarnEnhancedTestingNeeded
      | Self::WarnSpellingErrors => Decision::Warn,
      Self::AllowWithTestingRequired | Self::AllowLowRiskSafe => Decision::Allow,
    }
  }

  /// Short human description shown by the dashboard for this code.
  pub fn description(self) -> &'static str {
    match self {
      Self::BlockCriticalSecurity => {
        "Immediate escalation required - critical security threat detected"
      }
      Self::BlockCredentialExposure => "Credentials exposed - immediate security action required",
      Self::BlockDangerousExec => "Dangerous code execution detected - manual review mandatory",
      Self::BlockHighSecurityRisk => "High risk - requires manual review and escalation",
      Self::BlockDangerousOperations => "Dangerous operations detected - security review needed",
      Self::WarnModerateRiskReview => "Moderate risk - additional code review and testing required",
      Self::WarnBuildConfigChanges => "Build configuration changes - deployment review needed",
      Self::WarnConfigChangesReview => {
        "Configuration changes detected - audit and deployment review needed"
      }
      Self::WarnEnhancedTestingNeeded => {
        "Enhanced testing requirements - additional test coverage recommended"
      }
      Self::WarnSpellingErrors => {
        "Spelling mistakes detected in code or comments; please fix typos and documentation."
      }
      Self::AllowWithTestingRequired => "Approved - testing recommended before merge",
      Self::AllowLowRiskSafe => "Low risk - safe to merge",
    }
  }
}

impl fmt::Display for SuggestionCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSuggestionCode(pub String);

impl fmt::Display for UnknownSuggestionCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown suggestion code: {}", self.0)
  }
}

impl std::error::Error for UnknownSuggestionCode {}

impl FromStr for SuggestionCode {
  type Err = UnknownSuggestionCode;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    Self::ALL
      .into_iter()
      .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| UnknownSuggestionCode(wanted.to_string()))
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
  pub pr_number: String,
  pub risk_score: f64,
  pub risk_level: RiskLevel,
  pub decision: Decision,
  pub pr_status: String,
  pub missing_tests: Vec<String>,
  pub suggested_tests: Vec<String>,
  pub summary: String,
  pub explanation: String,
  pub suggestion_code: SuggestionCode,
  pub spelling_suggestions: Vec<String>,
  /// Short enrichment recommendation; only present when no spelling issues were found.
  #[serde(rename = "groqSuggestion")]
  pub enrichment_suggestion: Option<String>,
  /// Errors are absorbed by the engine; kept for contract compatibility.
  pub error_message: Option<String>,
  /// Unix epoch milliseconds.
  pub analysis_timestamp: i64,
}

/// One entry of the suggestion-code catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionCodeInfo {
  pub code: SuggestionCode,
  pub decision: Decision,
  pub description: &'static str,
}

/// The full taxonomy with its descriptions, in declaration order.
pub fn suggestion_catalog() -> Vec<SuggestionCodeInfo> {
  SuggestionCode::ALL
    .into_iter()
    .map(|code| SuggestionCodeInfo {
      code,
      decision: code.decision(),
      description: code.description(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn null_fields_normalize_to_defaults() {
    let raw: AnalyzeRequest =
      serde_json::from_str(r#"{"prNumber": null, "changedFiles": null, "repository": "a/b"}"#)
        .unwrap();
    let req = ChangeRequest::from(raw);
    assert_eq!(req.id, "unknown");
    assert_eq!(req.author, "unknown");
    assert!(req.files.is_empty());
    assert!(req.diff.is_empty());
  }

  #[test]
  fn suggestion_codes_serialize_screaming_snake() {
    let json = serde_json::to_string(&SuggestionCode::WarnBuildConfigChanges).unwrap();
    assert_eq!(json, "\"WARN_BUILD_CONFIG_CHANGES\"");
    for code in SuggestionCode::ALL {
      let json = serde_json::to_string(&code).unwrap();
      assert_eq!(json.trim_matches('"'), code.as_str());
      assert_eq!(code.as_str().parse::<SuggestionCode>().unwrap(), code);
    }
  }

  #[test]
  fn code_prefix_matches_bucket() {
    for code in SuggestionCode::ALL {
      assert!(code.as_str().starts_with(code.decision().as_str()));
    }
  }

  #[test]
  fn risk_level_thresholds() {
    assert_eq!(RiskLevel::from_score(0.95), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(0.90), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(0.75), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(0.35), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(0.10), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Minimal);
  }

  #[test]
  fn allow_status_depends_on_risk() {
    assert_eq!(Decision::Allow.status(0.0), "✅ APPROVED - Safe to merge");
    assert_eq!(
      Decision::Allow.status(0.2),
      "✅ APPROVED - Additional testing recommended"
    );
    assert!(Decision::Block.status(1.0).contains("BLOCKED"));
  }
}
