pub mod health;
pub mod me;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::missions::handlers as mission_handlers;
use crate::plans::handlers as plan_handlers;
use crate::resumes::handlers as resume_handlers;
use crate::state::AppState;

/// Caller identity, resolved by the (external) authenticating layer and
/// passed through explicitly.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/plans", post(plan_handlers::handle_create_plan))
        .route(
            "/api/v1/resumes",
            post(resume_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/missions/today",
            get(mission_handlers::handle_today),
        )
        .route(
            "/api/v1/missions/:id/complete",
            post(mission_handlers::handle_complete),
        )
        .route("/api/v1/me", get(me::handle_me))
        .with_state(state)
}
