//! Rule-based risk score and decision from diff text and file path patterns.

use crate::types::Decision;

/// Lines of diff that saturate the line-count heuristic.
const LINES_FOR_FULL_RISK: f64 = 200.0;

/// Diff tokens (lowercase) that short-circuit to a blocking score.
const DANGEROUS_TOKENS: &[&str] = &["system.exit", "runtime.getruntime", "exec(", "password"];

const CONFIG_EXTENSIONS: &[&str] = &[".properties", ".yml", ".yaml", ".xml"];
const BUILD_MANIFESTS: &[&str] = &["pom.xml", "build.gradle", "dockerfile"];
const SECURITY_KEYWORDS: &[&str] = &["security", "auth", "password", "secret"];

const TEST_OR_DOC_SUFFIXES: &[&str] = &[
  ".test.js",
  ".spec.js",
  ".test.java",
  ".spec.java",
  ".md",
  ".txt",
  ".doc",
];

pub const BLOCK_THRESHOLD: f64 = 0.75;
pub const WARN_THRESHOLD: f64 = 0.35;

/// Number of diff lines, ignoring trailing empty lines.
pub fn line_count(diff: &str) -> usize {
  let mut lines: Vec<&str> = diff.split('\n').collect();
  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }
  lines.len()
}

/// Risk 0.0–1.0: base from line count, dangerous tokens dominate, then bump for risky files.
pub fn compute_risk(diff: &str, files: &[String]) -> f64 {
  if diff.trim().is_empty() {
    return 0.0;
  }

  let mut score = (line_count(diff) as f64 / LINES_FOR_FULL_RISK).min(1.0);

  let lower = diff.to_lowercase();
  if DANGEROUS_TOKENS.iter().any(|t| lower.contains(t)) {
    return (score + 0.5).max(BLOCK_THRESHOLD).min(1.0);
  }

  for path in files {
    let p = path.to_lowercase();
    if CONFIG_EXTENSIONS.iter().any(|ext| p.ends_with(ext)) {
      score += 0.10;
    }
    if BUILD_MANIFESTS.iter().any(|m| p.contains(m)) {
      score += 0.15;
    }
    if SECURITY_KEYWORDS.iter().any(|k| p.contains(k)) {
      score += 0.20;
    }
  }
  score.min(1.0)
}

/// True for test specs and documentation files.
pub fn is_test_or_doc(path: &str) -> bool {
  let p = path.to_lowercase();
  TEST_OR_DOC_SUFFIXES.iter().any(|s| p.ends_with(s))
}

/// Decision from risk; ties go to the more severe bucket.
pub fn classify(risk: f64, files: &[String]) -> Decision {
  if risk >= BLOCK_THRESHOLD {
    return Decision::Block;
  }
  if risk >= WARN_THRESHOLD {
    return Decision::Warn;
  }

  // Redundant with the default below: tests/docs-only changes are allowed.
  let only_tests_and_docs = !files.is_empty() && files.iter().all(|f| is_test_or_doc(f));
  if only_tests_and_docs && risk < 0.10 {
    return Decision::Allow;
  }

  Decision::Allow
}
