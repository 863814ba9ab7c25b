//! Shared record types produced by the pipeline stages.

use serde::{Deserialize, Serialize};

/// Structured summary returned by the oracle, or the fallback shape when the
/// response failed schema parsing.
///
/// Field types are strict on purpose: deserialising an oracle response into
/// this struct rejects valid JSON whose fields have the wrong shape (e.g.
/// `bullets` as a string), so mis-shaped responses take the fallback path
/// instead of crashing later stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// One-sentence summary.
    #[serde(default)]
    pub one_liner: String,
    /// Key points, expected 5-7 entries.
    #[serde(default)]
    pub bullets: Vec<String>,
    /// People, companies, funds, products mentioned.
    #[serde(default)]
    pub entities: Vec<String>,
    /// Risks or issues mentioned. An empty list means "none detected" and is
    /// distinct from the field being absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Vec<String>>,
    /// Unparsed oracle output, set only when schema parsing failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl SummaryResult {
    /// Fallback shape for an oracle response that was not valid (or not
    /// correctly shaped) JSON: structured fields empty, `raw` preserved for
    /// display.
    pub fn fallback(raw: impl Into<String>) -> Self {
        Self {
            one_liner: String::new(),
            bullets: Vec::new(),
            entities: Vec::new(),
            risks: Some(Vec::new()),
            raw: Some(raw.into()),
        }
    }

    /// True when this result came from the fallback path.
    pub fn is_fallback(&self) -> bool {
        self.raw.is_some()
    }
}

/// Deterministic quality check over a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 0-100, derived as `100 - 20 * issues.len()`, floored at 0.
    pub confidence: u8,
    /// Triggered issue descriptions in check order.
    pub issues: Vec<String>,
}

/// The merged record handed to the presentation and export collaborators.
///
/// Serialises as a single flat JSON object: the summary fields at the top
/// level with `tags` and `evaluation` attached, matching the summary
/// artifact layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    #[serde(flatten)]
    pub summary: SummaryResult,
    pub tags: Vec<String>,
    pub evaluation: Evaluation,
}
