use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, error};

use crate::errors::AppError;
use crate::opportunity::{OpportunityAnalysis, OpportunityExtractor, ProgressEvent, SourcePost};
use crate::state::AppState;
use crate::tenant::TenantContext;

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

fn default_enable_cache() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeOpportunityRequest {
    pub post_id: i32,
    /// Accepted for client compatibility. Results are never cached.
    #[serde(default = "default_enable_cache")]
    pub enable_cache: bool,
}

/// Resolves the tenant's post and checks it has text to analyze.
async fn load_source_post(
    state: &AppState,
    tenant: TenantContext,
    req: &AnalyzeOpportunityRequest,
) -> Result<SourcePost, AppError> {
    debug!(
        "Analyze request: post_id={} tenant_id={} user_id={:?} enable_cache={}",
        req.post_id, tenant.tenant_id, tenant.user_id, req.enable_cache
    );

    let post = state
        .store
        .get_post(req.post_id, tenant.tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", req.post_id)))?;

    post.source_post().ok_or_else(|| {
        AppError::Validation(format!("Post {} has no content to analyze", req.post_id))
    })
}

/// POST /api/ai/analyze-opportunity
pub async fn handle_analyze_opportunity(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(req): Json<AnalyzeOpportunityRequest>,
) -> Result<Json<OpportunityAnalysis>, AppError> {
    let post = load_source_post(&state, tenant, &req).await?;
    let analysis = OpportunityExtractor::new(state.llm.clone())
        .analyze(&post)
        .await?;
    Ok(Json(analysis))
}

/// POST /api/ai/analyze-opportunity/stream
///
/// Lookup failures are ordinary error responses. Once the body starts, every
/// failure arrives as the final `error` line instead.
pub async fn handle_analyze_opportunity_stream(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(req): Json<AnalyzeOpportunityRequest>,
) -> Result<Response, AppError> {
    let post = load_source_post(&state, tenant, &req).await?;
    let events = OpportunityExtractor::new(state.llm.clone()).analyze_streaming(post);

    let lines = events.map(|event| encode_line(&event));
    Ok((
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(lines),
    )
        .into_response())
}

fn encode_line(event: &ProgressEvent) -> Result<Bytes, serde_json::Error> {
    let mut line = serde_json::to_vec(event).map_err(|e| {
        error!("Failed to encode {} event: {e}", event.status());
        e
    })?;
    line.push(b'\n');
    if event.is_terminal() {
        debug!("Analysis stream closing with {}", event.status());
    }
    Ok(Bytes::from(line))
}
