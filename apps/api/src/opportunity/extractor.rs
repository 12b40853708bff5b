//! Opportunity Extractor: synchronous analysis pipeline.
//!
//! Flow: build_prompt → complete → parse JSON → normalize fields →
//!       company/contact suggestions → assemble `OpportunityAnalysis`.
//!
//! The stages on `ResponseDocument` are shared with the streaming variant in
//! `progress`, so both produce the same analysis for the same model output.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::llm_client::{strip_json_fences, CompletionClient};
use crate::opportunity::fields::{normalize_field, normalize_field_or, NormalizedField};
use crate::opportunity::models::{
    CompanySuggestion, ContactSuggestion, OpportunityAnalysis, SourcePost,
};
use crate::opportunity::prompts::{build_prompt, MODEL_CONFIG, SYSTEM_MESSAGE};
use crate::opportunity::suggestions::{build_company_suggestion, build_contact_suggestion};
use crate::opportunity::AnalysisError;

pub const DEFAULT_CATEGORY: &str = "other";
pub const DEFAULT_URGENCY: &str = "normal";

/// Runs opportunity analysis against a shared completion backend.
/// Holds no per-run state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct OpportunityExtractor {
    pub(super) llm: Arc<dyn CompletionClient>,
}

impl OpportunityExtractor {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Analyzes one post. Any failure aborts the run; no partial analysis is returned.
    pub async fn analyze(&self, post: &SourcePost) -> Result<OpportunityAnalysis, AnalysisError> {
        let run_id = Uuid::new_v4();
        info!(
            "Opportunity analysis {run_id} started ({} chars)",
            post.content.chars().count()
        );

        let prompt = build_prompt(&post.content, post.author_profile_url.as_deref());
        let raw_text = self
            .llm
            .complete(SYSTEM_MESSAGE, &prompt, &MODEL_CONFIG)
            .await?;

        let document = ResponseDocument::parse(&raw_text)?;
        let extraction = document.extract();
        let analysis = document.finalize(extraction);

        info!(
            "Opportunity analysis {run_id} finished: is_opportunity={}, confidence={:.2}",
            analysis.is_opportunity, analysis.confidence
        );
        Ok(analysis)
    }
}

/// Fields and suggestions pulled out of a parsed response.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Extraction {
    pub extracted_fields: BTreeMap<String, NormalizedField>,
    pub company_suggestion: Option<CompanySuggestion>,
    pub contact_suggestion: Option<ContactSuggestion>,
}

/// The model's reply, parsed but not yet trusted. Every key may be missing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResponseDocument {
    root: Map<String, Value>,
}

impl ResponseDocument {
    /// Parses raw completion text. Invalid JSON is an error, never defaulted.
    pub fn parse(raw_text: &str) -> Result<Self, AnalysisError> {
        let body = strip_json_fences(raw_text);
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(root)) => Ok(Self { root }),
            Ok(other) => Err(AnalysisError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => {
                debug!("Unparseable completion text: {:?}", truncate(raw_text, 200));
                Err(AnalysisError::MalformedResponse(e.to_string()))
            }
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    fn field(&self, key: &str) -> NormalizedField {
        normalize_field(self.get(key))
    }

    pub fn extract(&self) -> Extraction {
        let extracted_fields = match self.get("extracted_fields") {
            Some(Value::Object(fields)) => fields
                .iter()
                .map(|(name, raw)| (name.clone(), normalize_field(Some(raw))))
                .collect(),
            _ => BTreeMap::new(),
        };

        Extraction {
            extracted_fields,
            company_suggestion: build_company_suggestion(self.get("company_suggestion")),
            contact_suggestion: build_contact_suggestion(self.get("contact_suggestion")),
        }
    }

    /// Assembles the final record, defaulting whatever the model left out.
    pub fn finalize(&self, extraction: Extraction) -> OpportunityAnalysis {
        let category = normalize_field_or(self.get("category"), Some(json!(DEFAULT_CATEGORY)))
            .text()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let urgency = normalize_field_or(self.get("urgency"), Some(json!(DEFAULT_URGENCY)))
            .text()
            .unwrap_or_else(|| DEFAULT_URGENCY.to_string());

        OpportunityAnalysis {
            is_opportunity: self.field("is_opportunity").flag().unwrap_or(false),
            confidence: self.field("confidence").score().unwrap_or(0.0),
            extracted_fields: extraction.extracted_fields,
            company_suggestion: extraction.company_suggestion,
            contact_suggestion: extraction.contact_suggestion,
            category,
            urgency,
            tags: self.field("tags").tags(),
            budget_range: self.field("budget_range").text(),
            timeline: self.field("timeline").text(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
