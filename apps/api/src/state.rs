use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::store::CrmStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production.
    pub llm: Arc<dyn CompletionClient>,
    /// Tenant-scoped CRM reads. `PgStore` in production.
    pub store: Arc<dyn CrmStore>,
    pub config: Config,
}
