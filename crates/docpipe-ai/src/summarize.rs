//! Structured document summarization over a [`TextOracle`].
//!
//! The oracle is asked for a bare JSON object matching the summary schema.
//! Its response is fence-stripped and parsed with strict field shapes;
//! anything that fails the parse becomes the fallback [`SummaryResult`]
//! carrying the raw text. Transport failures are never downgraded to the
//! fallback.

use docpipe_core::SummaryResult;
use thiserror::Error;
use tracing::warn;

use crate::oracle::{OracleError, TextOracle};

/// Hard cap on document characters sent to the oracle. Longer documents
/// lose trailing content; there is no chunking.
const MAX_PROMPT_CHARS: usize = 6000;

const ANALYST_PROMPT: &str = "\
You are a professional document analyst.

Extract the following from the document and return ONLY valid JSON with this schema:
{
  \"one_liner\": \"One sentence summary\",
  \"bullets\": [\"5-7 bullet points max\"],
  \"entities\": [\"people, companies, funds, products\"],
  \"risks\": [\"key risks or issues mentioned (if none, empty list)\"]
}";

#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The oracle call itself failed (network, auth, rate limit, server).
    #[error("summarization service call failed: {0}")]
    Service(#[from] OracleError),
}

/// Structured summarizer over an injected oracle.
pub struct Summarizer {
    oracle: Box<dyn TextOracle>,
}

impl Summarizer {
    pub fn new(oracle: Box<dyn TextOracle>) -> Self {
        Self { oracle }
    }

    /// Summarize a document.
    ///
    /// Exactly one oracle call per invocation, no retries. Malformed or
    /// mis-shaped response content is recovered into the fallback summary;
    /// service failures propagate as [`SummarizeError::Service`].
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        let prompt = build_prompt(truncate_chars(text, MAX_PROMPT_CHARS));
        let response = self.oracle.generate(&prompt).await?;
        let cleaned = strip_code_fences(&response);

        match serde_json::from_str::<SummaryResult>(cleaned) {
            Ok(summary) => Ok(summary),
            Err(err) => {
                warn!(error = %err, "oracle response failed schema parse, keeping raw text");
                Ok(SummaryResult::fallback(cleaned))
            }
        }
    }
}

fn build_prompt(document: &str) -> String {
    format!("{ANALYST_PROMPT}\n\nDocument:\n{document}")
}

/// First `max` characters of `text`, never splitting a UTF-8 sequence.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strip a markdown code fence wrapping from an oracle response.
///
/// The oracle sometimes wraps its JSON in markdown fences despite the
/// prompt. Handles a leading fence (with or without a `json` info string)
/// and a trailing fence, in any combination, and trims surrounding
/// whitespace.
fn strip_code_fences(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Canned oracle that records the prompt it was given.
    struct FakeOracle {
        response: Result<String, OracleError>,
        seen_prompt: Arc<Mutex<Option<String>>>,
    }

    impl FakeOracle {
        fn replying(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                seen_prompt: Arc::new(Mutex::new(None)),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(OracleError::Server {
                    status: 429,
                    body: "rate limited".into(),
                }),
                seen_prompt: Arc::new(Mutex::new(None)),
            }
        }

        /// Handle to the recorded prompt, usable after the oracle is moved
        /// into a summarizer.
        fn seen(&self) -> Arc<Mutex<Option<String>>> {
            self.seen_prompt.clone()
        }
    }

    #[async_trait]
    impl TextOracle for FakeOracle {
        async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(OracleError::Server { status, body }) => Err(OracleError::Server {
                    status: *status,
                    body: body.clone(),
                }),
                Err(_) => unreachable!(),
            }
        }
    }

    const GOOD_JSON: &str = r#"{
        "one_liner": "A fund prospectus covering fee structure and tax treatment.",
        "bullets": ["b1", "b2", "b3", "b4", "b5"],
        "entities": ["Acme Fund"],
        "risks": []
    }"#;

    #[tokio::test]
    async fn parses_plain_json_response() {
        let summarizer = Summarizer::new(Box::new(FakeOracle::replying(GOOD_JSON)));
        let summary = summarizer.summarize("doc text").await.unwrap();
        assert_eq!(summary.bullets.len(), 5);
        assert_eq!(summary.risks, Some(vec![]));
        assert!(summary.raw.is_none());
    }

    #[tokio::test]
    async fn parses_fenced_json_response() {
        let fenced = format!("```json\n{GOOD_JSON}\n```");
        let summarizer = Summarizer::new(Box::new(FakeOracle::replying(&fenced)));
        let summary = summarizer.summarize("doc text").await.unwrap();
        assert_eq!(summary.entities, vec!["Acme Fund"]);
        assert!(summary.raw.is_none());
    }

    #[tokio::test]
    async fn non_json_response_falls_back_with_raw() {
        let summarizer = Summarizer::new(Box::new(FakeOracle::replying(
            "```\nSorry, I cannot help with that.\n```",
        )));
        let summary = summarizer.summarize("doc text").await.unwrap();
        assert!(summary.is_fallback());
        assert_eq!(
            summary.raw.as_deref(),
            Some("Sorry, I cannot help with that.")
        );
        assert!(summary.bullets.is_empty());
        assert_eq!(summary.risks, Some(vec![]));
    }

    #[tokio::test]
    async fn mis_shaped_json_falls_back_with_raw() {
        let wrong_shape = r#"{"one_liner": "ok", "bullets": "not a list"}"#;
        let summarizer = Summarizer::new(Box::new(FakeOracle::replying(wrong_shape)));
        let summary = summarizer.summarize("doc text").await.unwrap();
        assert!(summary.is_fallback());
        assert_eq!(summary.raw.as_deref(), Some(wrong_shape));
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let summarizer = Summarizer::new(Box::new(FakeOracle::failing()));
        let err = summarizer.summarize("doc text").await.unwrap_err();
        assert!(matches!(
            err,
            SummarizeError::Service(OracleError::Server { status: 429, .. })
        ));
    }

    #[tokio::test]
    async fn prompt_carries_truncated_document() {
        let oracle = FakeOracle::replying(GOOD_JSON);
        let seen = oracle.seen();
        let long_doc = "x".repeat(10_000);

        let summarizer = Summarizer::new(Box::new(oracle));
        summarizer.summarize(&long_doc).await.unwrap();

        let prompt = seen.lock().unwrap().clone().expect("oracle was called");
        assert!(prompt.contains("ONLY valid JSON"));
        let document = prompt
            .split("Document:\n")
            .nth(1)
            .expect("prompt ends with the document");
        assert_eq!(document.chars().count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
        assert_eq!(truncate_chars(&text, 20), text.as_str());
    }

    #[test]
    fn fence_stripping_variants() {
        let body = r#"{"one_liner": "x"}"#;
        let cases = [
            body.to_string(),
            format!("```json\n{body}\n```"),
            format!("```\n{body}\n```"),
            format!("  ```json\n{body}\n```  "),
            format!("```json{body}```"),
            // Unterminated fence still yields the body.
            format!("```json\n{body}"),
            format!("{body}\n```"),
        ];
        for case in &cases {
            assert_eq!(strip_code_fences(case), body, "case: {case:?}");
        }
    }

    #[test]
    fn fence_stripping_leaves_inner_backticks() {
        let body = "use `cargo build` to compile";
        assert_eq!(strip_code_fences(body), body);
    }
}
