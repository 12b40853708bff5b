//! Progressive analysis: the extractor's stages exposed as an ordered event stream.
//!
//! Order: starting → analyzing → processing → extracting_fields →
//! [company_extracted] → [contact_extracted] → finalizing → completed.
//! Any failure yields a single `error` event and ends the stream.
//! Dropping the stream abandons an in-flight completion call.

use std::sync::Arc;

use futures::Stream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::opportunity::extractor::{OpportunityExtractor, ResponseDocument};
use crate::opportunity::models::{OpportunityAnalysis, ProgressEvent, SourcePost};
use crate::opportunity::prompts::{build_prompt, MODEL_CONFIG, SYSTEM_MESSAGE};
use crate::opportunity::AnalysisError;

impl OpportunityExtractor {
    /// Streams progress for one post. Exactly one terminal event
    /// (`completed` or `error`) closes the stream.
    pub fn analyze_streaming(
        &self,
        post: SourcePost,
    ) -> impl Stream<Item = ProgressEvent> + Send + 'static {
        let llm = Arc::clone(&self.llm);

        async_stream::stream! {
            let run_id = Uuid::new_v4();
            info!("Streaming opportunity analysis {run_id} started");
            yield ProgressEvent::Starting { message: "Starting AI analysis...".into() };

            let prompt = build_prompt(&post.content, post.author_profile_url.as_deref());
            yield ProgressEvent::Analyzing { message: "Analyzing post content with AI...".into() };

            let raw_text = match llm.complete(SYSTEM_MESSAGE, &prompt, &MODEL_CONFIG).await {
                Ok(text) => text,
                Err(e) => {
                    let err = AnalysisError::from(e);
                    warn!("Streaming opportunity analysis {run_id} failed: {err}");
                    yield failure(&err);
                    return;
                }
            };
            yield ProgressEvent::Processing { message: "Processing AI response...".into() };

            let document = match ResponseDocument::parse(&raw_text) {
                Ok(document) => document,
                Err(err) => {
                    warn!("Streaming opportunity analysis {run_id} failed: {err}");
                    yield failure(&err);
                    return;
                }
            };
            yield ProgressEvent::ExtractingFields { message: "Extracting opportunity fields...".into() };

            let extraction = document.extract();
            if let Some(company) = &extraction.company_suggestion {
                yield ProgressEvent::CompanyExtracted {
                    message: format!("Company identified: {}", company.name),
                };
            }
            if extraction.contact_suggestion.is_some() {
                yield ProgressEvent::ContactExtracted { message: "Contact information extracted".into() };
            }
            yield ProgressEvent::Finalizing { message: "Finalizing analysis...".into() };

            let analysis = document.finalize(extraction);
            info!(
                "Streaming opportunity analysis {run_id} finished: is_opportunity={}",
                analysis.is_opportunity
            );
            yield completed(analysis);
        }
    }
}

fn completed(analysis: OpportunityAnalysis) -> ProgressEvent {
    ProgressEvent::Completed {
        message: "Analysis completed".to_string(),
        result: Box::new(analysis),
    }
}

fn failure(err: &AnalysisError) -> ProgressEvent {
    let message = match err {
        AnalysisError::MalformedResponse(_) => "AI returned invalid JSON",
        AnalysisError::Upstream(_) => "AI analysis failed",
    };
    ProgressEvent::Error {
        message: message.to_string(),
        error: err.to_string(),
    }
}
