pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::opportunity::handlers as opportunity;
use crate::proposal::handlers as proposal;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/ai/analyze-opportunity",
            post(opportunity::handle_analyze_opportunity),
        )
        .route(
            "/api/ai/analyze-opportunity/stream",
            post(opportunity::handle_analyze_opportunity_stream),
        )
        .route(
            "/api/ai/generate-proposal",
            post(proposal::handle_generate_proposal),
        )
        .with_state(state)
}
