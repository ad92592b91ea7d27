//! Missing-test findings, fallback test suggestions, summary and explanation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::risk::{BLOCK_THRESHOLD, WARN_THRESHOLD};
use crate::types::ChangeRequest;

static PUBLIC_METHOD: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"public (static )?[\w<>\[\]]+\s+\w+\s*\(").expect("valid regex"));
static MAIN_SOURCE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"src/main/.*\.java$").expect("valid regex"));
static TEST_SOURCE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"src/test/.*\.java$").expect("valid regex"));

const ENDPOINT_MARKERS: &[&str] = &["new endpoint", "@GetMapping", "@PostMapping"];
const DOC_OR_TEST_MARKERS: &[&str] = &["test", "spec", ".md", ".txt", "readme"];
const SECURITY_MARKERS: &[&str] = &["security", "auth", "password", "secret", "crypto", "ssl"];
const CONFIG_SUFFIXES: &[&str] = &["properties", "yml", "yaml", "xml"];

/// One gap in test coverage detected from the diff or file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTest {
  PublicMethods(usize),
  TodoFixme,
  NewEndpoints,
  TestsMissing,
  ApiIntegration,
  ServiceLayer,
}

impl MissingTest {
  /// Canned recommendation for this finding, if its category has one.
  pub fn recommendation(self) -> Option<&'static str> {
    match self {
      Self::PublicMethods(_) | Self::ServiceLayer => {
        Some("Create JUnit tests covering edge cases and null inputs")
      }
      Self::NewEndpoints | Self::ApiIntegration => {
        Some("Add integration tests that call the endpoint and verify response code and payload")
      }
      Self::TodoFixme => Some("Add unit tests for the functionality marked TODO"),
      Self::TestsMissing => None,
    }
  }
}

impl fmt::Display for MissingTest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::PublicMethods(n) => write!(f, "Unit tests for new/changed public methods ({} found)", n),
      Self::TodoFixme => f.write_str("Address TODO/FIXME and add tests"),
      Self::NewEndpoints => f.write_str("Integration tests for new endpoints"),
      Self::TestsMissing => f.write_str("Test files are missing for modified source code"),
      Self::ApiIntegration => f.write_str("Integration tests for API endpoints"),
      Self::ServiceLayer => f.write_str("Unit tests for service layer changes"),
    }
  }
}

/// Findings in detection order: diff checks first, then file-path checks.
pub fn find_missing_tests(diff: &str, files: &[String]) -> Vec<MissingTest> {
  let mut out = Vec::new();
  let has_diff = !diff.trim().is_empty();
  if !has_diff && files.is_empty() {
    return out;
  }

  if has_diff {
    let methods = PUBLIC_METHOD.find_iter(diff).count();
    if methods > 0 {
      out.push(MissingTest::PublicMethods(methods));
    }
    if diff.contains("TODO") || diff.contains("FIXME") {
      out.push(MissingTest::TodoFixme);
    }
    if ENDPOINT_MARKERS.iter().any(|m| diff.contains(m)) {
      out.push(MissingTest::NewEndpoints);
    }
  }

  if !files.is_empty() {
    let lower: Vec<String> = files.iter().map(|f| f.to_lowercase()).collect();
    let has_main = lower.iter().any(|p| MAIN_SOURCE.is_match(p));
    let has_tests = lower.iter().any(|p| TEST_SOURCE.is_match(p));
    if has_main && !has_tests {
      out.push(MissingTest::TestsMissing);
    }
    if lower.iter().any(|p| p.contains("controller")) {
      out.push(MissingTest::ApiIntegration);
    }
    if lower.iter().any(|p| p.contains("service")) {
      out.push(MissingTest::ServiceLayer);
    }
  }

  out
}

/// Rule-based test suggestions, used when no enrichment is configured.
pub fn suggest_tests(findings: &[MissingTest]) -> Vec<String> {
  let mut out: Vec<String> = findings
    .iter()
    .filter_map(|f| f.recommendation())
    .map(str::to_string)
    .collect();
  if out.is_empty() {
    out.push("Add/verify unit tests for changed functionality".to_string());
  }
  out
}

/// Non-enriched explanation of the score.
pub fn explain(risk: f64, files: &[String]) -> String {
  if risk >= BLOCK_THRESHOLD {
    return "High risk: Large changes or dangerous operations detected. Requires manual security review."
      .to_string();
  }
  if risk >= WARN_THRESHOLD {
    return "Medium risk: Moderate changes detected. Additional testing and code review recommended."
      .to_string();
  }

  if !files.is_empty() {
    let lower: Vec<String> = files.iter().map(|f| f.to_lowercase()).collect();
    if lower
      .iter()
      .all(|p| DOC_OR_TEST_MARKERS.iter().any(|m| p.contains(m)))
    {
      return "Low risk: Only documentation and test files modified.".to_string();
    }
    if lower
      .iter()
      .any(|p| SECURITY_MARKERS.iter().any(|m| p.contains(m)))
    {
      return "Low risk: Small changes in security-related files. Verify implementation details."
        .to_string();
    }
  }

  "Low risk: Small changes or documentation-only updates.".to_string()
}

/// One-paragraph summary: id, author, file count and detected categories.
pub fn summary(req: &ChangeRequest) -> String {
  let mut s = format!(
    "PR #{} by {}. Changed files: {}. ",
    req.id,
    req.author,
    req.files.len()
  );

  let categories = categories(&req.files);
  if !categories.is_empty() {
    s.push_str(&format!("Contains: {}. ", categories.join(", ")));
  }

  s.push_str("Analysis completed by Gatekeeper.");
  s
}

/// Detected file categories in fixed order: tests, config, docs, source code.
fn categories(files: &[String]) -> Vec<&'static str> {
  let lower: Vec<String> = files.iter().map(|f| f.to_lowercase()).collect();
  let mut out = Vec::new();
  if lower.iter().any(|p| p.contains("test")) {
    out.push("tests");
  }
  if lower
    .iter()
    .any(|p| CONFIG_SUFFIXES.iter().any(|s| p.ends_with(s)))
  {
    out.push("config");
  }
  if lower.iter().any(|p| p.ends_with(".md") || p.ends_with(".txt")) {
    out.push("docs");
  }
  if lower.iter().any(|p| p.ends_with(".java")) {
    out.push("source code");
  }
  out
}
