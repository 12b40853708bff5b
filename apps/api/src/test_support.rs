//! In-memory doubles and fixtures shared by unit and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, LlmError, ModelConfig};
use crate::models::opportunity::OpportunityRow;
use crate::models::post::LinkedInPostRow;
use crate::state::AppState;
use crate::store::CrmStore;

/// A complete, well-formed analysis reply: company present, no contact.
pub const SAMPLE_ANALYSIS_JSON: &str = r#"{
  "is_opportunity": true,
  "confidence": 0.92,
  "extracted_fields": {
    "title": {"value": "Senior React Developer", "confidence": 0.9},
    "summary": {"value": "Fintech startup hiring a senior React developer", "confidence": 0.8},
    "scope": {"value": "Not mentioned", "confidence": 0.4},
    "skills_required": {"value": ["React", "TypeScript"], "confidence": 0.85}
  },
  "company_suggestion": {
    "name": {"value": "Acme Fintech", "confidence": 0.85},
    "domain": {"value": "acmefintech.io", "confidence": 0.6},
    "linkedin_url": null
  },
  "contact_suggestion": null,
  "category": "development",
  "urgency": "urgent",
  "tags": ["react", "typescript", "fintech"],
  "budget_range": "$80-100k",
  "timeline": "ASAP"
}"#;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub config: ModelConfig,
}

#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Fail(u16),
    Hang,
}

/// A `CompletionClient` that answers every call the same way and records it.
pub struct ScriptedCompletion {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCompletion {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn failing(status: u16) -> Self {
        Self::new(Script::Fail(status))
    }

    /// Never completes.
    pub fn hanging() -> Self {
        Self::new(Script::Hang)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(
        &self,
        system_message: &str,
        user_prompt: &str,
        config: &ModelConfig,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system_message.to_string(),
            prompt: user_prompt.to_string(),
            config: *config,
        });

        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".to_string(),
            }),
            Script::Hang => std::future::pending().await,
        }
    }
}

/// Tenant-scoped in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    pub posts: Vec<LinkedInPostRow>,
    pub opportunities: Vec<OpportunityRow>,
}

#[async_trait]
impl CrmStore for MemoryStore {
    async fn get_post(
        &self,
        post_id: i32,
        tenant_id: i32,
    ) -> Result<Option<LinkedInPostRow>, AppError> {
        Ok(self
            .posts
            .iter()
            .find(|p| p.id == post_id && p.tenant_id == tenant_id)
            .cloned())
    }

    async fn get_opportunity(
        &self,
        opportunity_id: i32,
        tenant_id: i32,
    ) -> Result<Option<OpportunityRow>, AppError> {
        Ok(self
            .opportunities
            .iter()
            .find(|o| o.id == opportunity_id && o.tenant_id == tenant_id)
            .cloned())
    }
}

pub fn sample_post(id: i32, tenant_id: i32, content: Option<&str>) -> LinkedInPostRow {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    LinkedInPostRow {
        id,
        tenant_id,
        user_id: None,
        post_url: format!("https://www.linkedin.com/posts/test-{id}"),
        author_profile_url: Some("https://www.linkedin.com/in/test-author/".to_string()),
        content: content.map(String::from),
        scraped_at: at,
        created_at: at,
        updated_at: at,
    }
}

pub fn sample_opportunity(id: i32, tenant_id: i32) -> OpportunityRow {
    OpportunityRow {
        id,
        tenant_id,
        company_id: None,
        contact_id: None,
        source_post_id: None,
        title: "Senior React Developer".to_string(),
        summary: Some("Fintech startup needs a React lead".to_string()),
        status: "DRAFT".to_string(),
        tags: Some(json!(["react", "fintech"])),
        created_at: Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap(),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/mapmyclient_test".to_string(),
        openai_api_key: "test-key".to_string(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        llm_timeout_secs: 5,
        port: 0,
        rust_log: "debug".to_string(),
        demo_mode: false,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
    }
}

pub fn test_state_with(llm: Arc<dyn CompletionClient>, store: MemoryStore) -> AppState {
    AppState {
        llm,
        store: Arc::new(store),
        config: test_config(),
    }
}

pub fn test_state() -> AppState {
    test_state_with(
        Arc::new(ScriptedCompletion::replying(SAMPLE_ANALYSIS_JSON)),
        MemoryStore::default(),
    )
}
