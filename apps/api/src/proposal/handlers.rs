use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::proposal::generator::{generate_proposal, GeneratedProposal};
use crate::state::AppState;
use crate::tenant::TenantContext;

#[derive(Debug, Deserialize)]
pub struct ProposalGenerationRequest {
    pub opportunity_id: i32,
    /// Templates are not implemented; the id is only logged.
    pub template_id: Option<i32>,
    pub additional_context: Option<String>,
}

/// POST /api/ai/generate-proposal
pub async fn handle_generate_proposal(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(req): Json<ProposalGenerationRequest>,
) -> Result<Json<GeneratedProposal>, AppError> {
    info!(
        "Proposal request: opportunity_id={} tenant_id={} template_id={:?}",
        req.opportunity_id, tenant.tenant_id, req.template_id
    );

    let opportunity = state
        .store
        .get_opportunity(req.opportunity_id, tenant.tenant_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Opportunity with id {} not found", req.opportunity_id))
        })?;

    let proposal =
        generate_proposal(&state.llm, &opportunity, req.additional_context.as_deref()).await?;
    Ok(Json(proposal))
}
