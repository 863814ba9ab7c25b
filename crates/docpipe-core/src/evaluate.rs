//! Deterministic summary quality checks.
//!
//! Inspects the original text length together with the summary shape and
//! produces a confidence score plus itemised issues. Never re-invokes the
//! oracle and never fails, including over the fallback summary shape.

use crate::record::{Evaluation, SummaryResult};

const ISSUE_SHORT_DOCUMENT: &str =
    "Document text is very short; extraction may be incomplete.";
const ISSUE_SHORT_ONE_LINER: &str = "One-liner summary is missing or too short.";
const ISSUE_FEW_BULLETS: &str = "Too few bullet points (expected 5–7).";

/// Minimum whitespace-separated words before the document counts as complete.
const MIN_DOCUMENT_WORDS: usize = 80;
/// Minimum words for a one-liner to count as present.
const MIN_ONE_LINER_WORDS: usize = 8;
/// Minimum bullet count.
const MIN_BULLETS: usize = 3;

const PENALTY_PER_ISSUE: u8 = 20;

/// Score a summary against the text it was produced from.
///
/// Checks run in a fixed order and each appends a fixed issue string, so the
/// `issues` sequence is stable. With three checks the reachable confidence
/// values are exactly 100, 80, 60, and 40.
pub fn evaluate(original_text: &str, summary: &SummaryResult) -> Evaluation {
    let mut issues = Vec::new();

    if original_text.split_whitespace().count() < MIN_DOCUMENT_WORDS {
        issues.push(ISSUE_SHORT_DOCUMENT.to_string());
    }

    if summary.one_liner.split_whitespace().count() < MIN_ONE_LINER_WORDS {
        issues.push(ISSUE_SHORT_ONE_LINER.to_string());
    }

    if summary.bullets.len() < MIN_BULLETS {
        issues.push(ISSUE_FEW_BULLETS.to_string());
    }

    let confidence = 100u8.saturating_sub(PENALTY_PER_ISSUE * issues.len() as u8);

    Evaluation { confidence, issues }
}
