// Opportunity analysis: turns a LinkedIn post into a structured opportunity record.
// All model calls go through llm_client; nothing here is persisted.

pub mod extractor;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod prompts;
pub mod suggestions;

use thiserror::Error;

use crate::llm_client::LlmError;

pub use extractor::OpportunityExtractor;
pub use models::{OpportunityAnalysis, ProgressEvent, SourcePost};

/// Why an analysis run produced no result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI completion failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("AI returned invalid JSON: {0}")]
    MalformedResponse(String),
}
