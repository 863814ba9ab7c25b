//! Rule-based topic tagging.
//!
//! A deliberately simple keyword classifier: fast, deterministic, and
//! independent of the oracle. A category is assigned when any of its
//! keywords occurs as a substring of the lower-cased document text.

/// Category rules in declaration order. Output tags preserve this order.
const RULES: &[(&str, &[&str])] = &[
    (
        "compliance",
        &["compliance", "regulation", "sec", "finra", "policy", "audit"],
    ),
    ("tax", &["tax", "irs", "withholding", "1099", "k-1"]),
    (
        "investing",
        &["portfolio", "fund", "allocation", "returns", "risk", "advisor"],
    ),
    (
        "health",
        &["health", "mental", "patient", "clinical", "care", "well-being"],
    ),
    (
        "education",
        &["student", "course", "curriculum", "learning", "class"],
    ),
    (
        "legal",
        &["agreement", "liability", "terms", "contract", "governing law"],
    ),
];

/// Catch-all tag used when no category rule matches.
pub const GENERAL_TAG: &str = "general";

/// Tag a document by keyword rules.
///
/// Total over all inputs and never returns an empty set: unmatched text
/// yields exactly `["general"]`, and `"general"` never co-occurs with
/// specific tags.
pub fn tag(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut tags: Vec<String> = RULES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| (*category).to_string())
        .collect();

    if tags.is_empty() {
        tags.push(GENERAL_TAG.to_string());
    }
    tags
}
