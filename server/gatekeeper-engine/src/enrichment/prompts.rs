//! Prompt builders for the enrichment calls.

use crate::types::{ChangeRequest, Decision, SuggestionCode};

const TESTS_DIFF_CHARS: usize = 500;
const EXPLAIN_DIFF_CHARS: usize = 800;
const SPELLING_DIFF_CHARS: usize = 1200;

/// Truncate to at most `max_chars` characters (never splits a code point).
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
  match s.char_indices().nth(max_chars) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

pub fn explanation(decision: Decision, risk: f64, req: &ChangeRequest) -> String {
  format!(
    "Analyze this PR:\n\n\
     Files: {}\n\
     Decision: {}\n\
     Risk Score: {:.2}\n\n\
     Diff:\n{}\n\n\
     Provide a concise technical analysis (2-3 sentences) highlighting the main risks or positive aspects. Be specific.",
    req.files.join(", "),
    decision,
    risk,
    truncate_str(&req.diff, EXPLAIN_DIFF_CHARS)
  )
}

pub fn suggestion_description(code: SuggestionCode, explanation: &str) -> String {
  format!(
    "Given the PR analysis suggestion code '{}' and explanation '{}', provide a concise, \
     actionable recommendation (max 100 chars) for developers. Be direct and specific.",
    code, explanation
  )
}

pub fn test_recommendations(req: &ChangeRequest) -> String {
  format!(
    "Analyze these changed files: {}\n\nDiff:\n{}\n\n\
     Generate 3 specific test recommendations (one per line, starting with '-'). Be concise.",
    req.files.join(", "),
    truncate_str(&req.diff, TESTS_DIFF_CHARS)
  )
}

pub fn spelling(diff: &str) -> String {
  format!(
    "Find up to 5 likely spelling mistakes or obvious typos in the following code or text diff \
     and provide suggested corrections.\n\nDiff:\n{}\n\n\
     Respond with one item per line in the format 'original -> suggestion'. If none, reply 'NONE'.",
    truncate_str(diff, SPELLING_DIFF_CHARS)
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_respects_char_boundaries() {
    assert_eq!(truncate_str("héllo", 2), "hé");
    assert_eq!(truncate_str("abc", 10), "abc");
    assert_eq!(truncate_str("", 3), "");
  }

  #[test]
  fn explanation_prompt_is_bounded() {
    let req = ChangeRequest::new("1", "a", vec!["a.rs".into(), "b.rs".into()], "x".repeat(2000));
    let prompt = explanation(Decision::Warn, 0.4, &req);
    assert!(prompt.contains("Files: a.rs, b.rs"));
    assert!(prompt.contains("Decision: WARN"));
    assert!(prompt.contains("Risk Score: 0.40"));
    assert!(!prompt.contains(&"x".repeat(801)));
    assert!(prompt.contains(&"x".repeat(800)));
  }
}
