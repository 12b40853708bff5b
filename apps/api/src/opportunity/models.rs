use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::opportunity::fields::NormalizedField;

/// The post text handed to the pipeline. Resolved from storage by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePost {
    pub content: String,
    pub author_profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySuggestion {
    pub name: String,
    /// Confidence of the name field alone.
    pub confidence: f64,
    pub domain: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSuggestion {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_profile_url: Option<String>,
    /// Strongest of the four per-field confidences.
    pub confidence: f64,
}

/// Final output of one analysis run. Never persisted by the pipeline itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityAnalysis {
    pub is_opportunity: bool,
    pub confidence: f64,
    pub extracted_fields: BTreeMap<String, NormalizedField>,
    pub company_suggestion: Option<CompanySuggestion>,
    pub contact_suggestion: Option<ContactSuggestion>,
    pub category: String,
    pub urgency: String,
    pub tags: Vec<String>,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
}

/// One line of the streaming analysis protocol.
///
/// Serialized as `{"status": "...", "message": "...", ...}`; `completed`
/// adds `result`, `error` adds `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgressEvent {
    Starting {
        message: String,
    },
    Analyzing {
        message: String,
    },
    Processing {
        message: String,
    },
    ExtractingFields {
        message: String,
    },
    CompanyExtracted {
        message: String,
    },
    ContactExtracted {
        message: String,
    },
    Finalizing {
        message: String,
    },
    Completed {
        message: String,
        result: Box<OpportunityAnalysis>,
    },
    Error {
        message: String,
        error: String,
    },
}

impl ProgressEvent {
    pub fn status(&self) -> &'static str {
        match self {
            ProgressEvent::Starting { .. } => "starting",
            ProgressEvent::Analyzing { .. } => "analyzing",
            ProgressEvent::Processing { .. } => "processing",
            ProgressEvent::ExtractingFields { .. } => "extracting_fields",
            ProgressEvent::CompanyExtracted { .. } => "company_extracted",
            ProgressEvent::ContactExtracted { .. } => "contact_extracted",
            ProgressEvent::Finalizing { .. } => "finalizing",
            ProgressEvent::Completed { .. } => "completed",
            ProgressEvent::Error { .. } => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::Completed { .. } | ProgressEvent::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_analysis() -> OpportunityAnalysis {
        OpportunityAnalysis {
            is_opportunity: false,
            confidence: 0.0,
            extracted_fields: BTreeMap::new(),
            company_suggestion: None,
            contact_suggestion: None,
            category: "other".to_string(),
            urgency: "normal".to_string(),
            tags: vec![],
            budget_range: None,
            timeline: None,
        }
    }

    #[test]
    fn test_progress_event_serializes_status_tag_and_message() {
        let event = ProgressEvent::Analyzing {
            message: "Sending post to AI model...".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"status": "analyzing", "message": "Sending post to AI model..."})
        );
    }

    #[test]
    fn test_completed_event_carries_result_inline() {
        let event = ProgressEvent::Completed {
            message: "Analysis complete".to_string(),
            result: Box::new(empty_analysis()),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["result"]["category"], "other");
        assert_eq!(value["result"]["company_suggestion"], serde_json::Value::Null);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_event_has_error_field() {
        let event = ProgressEvent::Error {
            message: "AI returned invalid JSON".to_string(),
            error: "expected value at line 1 column 1".to_string(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "expected value at line 1 column 1");
        assert!(event.is_terminal());
    }

    #[test]
    fn test_status_matches_serialized_tag() {
        let event = ProgressEvent::ExtractingFields {
            message: String::new(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], event.status());
        assert!(!event.is_terminal());
    }
}
