//! Pipeline composition root.
//!
//! Sequences extraction, tagging, summarization, and evaluation over a
//! single document and merges their outputs into one record. Data flows one
//! direction; each stage produces a new structure and the orchestrator owns
//! every intermediate until the merged result is handed back.

use docpipe_ai::{SummarizeError, Summarizer};
use docpipe_core::{PipelineResult, evaluate, tag};
use docpipe_extract::ExtractError;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}

/// Outcome of a pipeline run.
#[derive(Debug)]
pub enum RunOutcome {
    /// The document produced a merged result. The extracted text rides
    /// along so callers can persist the text artifact.
    Complete {
        text: String,
        result: PipelineResult,
    },
    /// The document had no extractable text. A valid terminal outcome, not
    /// an error; render it as a user-facing message.
    NoText,
}

/// Single-document pipeline. Stateless across runs; each run owns its own
/// records.
pub struct Pipeline {
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(summarizer: Summarizer) -> Self {
        Self { summarizer }
    }

    /// Run the full pipeline over one PDF byte buffer.
    ///
    /// Extraction completes first; tagging runs alongside the oracle call
    /// (the tagger never waits on network latency); evaluation runs strictly
    /// after the summary, possibly over its fallback shape.
    pub async fn run(&self, bytes: &[u8]) -> Result<RunOutcome, PipelineError> {
        let text = docpipe_extract::extract(bytes)?;
        if text.is_empty() {
            info!("no extractable text, stopping before analysis");
            return Ok(RunOutcome::NoText);
        }

        let (summary, tags) =
            tokio::join!(self.summarizer.summarize(&text), async { tag::tag(&text) });
        let summary = summary?;

        let evaluation = evaluate::evaluate(&text, &summary);

        info!(
            tags = tags.len(),
            confidence = evaluation.confidence,
            fallback = summary.is_fallback(),
            "pipeline run complete"
        );

        Ok(RunOutcome::Complete {
            text,
            result: PipelineResult {
                summary,
                tags,
                evaluation,
            },
        })
    }
}
