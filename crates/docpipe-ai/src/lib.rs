//! External text-generation oracle client and structured summarization.

pub mod oracle;
pub mod summarize;

pub use oracle::{HttpOracle, OracleConfig, OracleConfigError, OracleError, TextOracle};
pub use summarize::{SummarizeError, Summarizer};
