//! Parsing of line-oriented completion responses.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_TEST_RECOMMENDATIONS: usize = 3;
pub const MAX_SPELLING_SUGGESTIONS: usize = 5;

static ENUMERATION_PREFIX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[\d.)\s-]+").expect("valid regex"));
static ENDS_WITH_ENUMERATION: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\d\.$").expect("valid regex"));

/// Up to 3 recommendations: bullets stripped, headings and bare enumerators skipped.
///
/// Both `-` and `*` bullets are stripped, and a bullet with nothing after the
/// marker is dropped rather than kept as an empty recommendation.
pub fn test_recommendations(response: &str) -> Vec<String> {
  response
    .lines()
    .map(str::trim)
    .filter_map(|line| {
      if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*')) {
        let rest = rest.trim();
        return (!rest.is_empty()).then(|| rest.to_string());
      }
      if line.is_empty() || line.starts_with('#') || ENDS_WITH_ENUMERATION.is_match(line) {
        return None;
      }
      Some(line.to_string())
    })
    .take(MAX_TEST_RECOMMENDATIONS)
    .collect()
}

/// Up to 5 "original -> suggestion" items; a literal "none" means no findings.
pub fn spelling_suggestions(response: &str) -> Vec<String> {
  let response = response.trim();
  if response.eq_ignore_ascii_case("none") {
    return Vec::new();
  }
  response
    .lines()
    .map(|line| ENUMERATION_PREFIX.replace(line.trim(), "").trim().to_string())
    .filter(|line| !line.is_empty())
    .take(MAX_SPELLING_SUGGESTIONS)
    .collect()
}
