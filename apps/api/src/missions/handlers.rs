use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::missions::complete::complete_mission;
use crate::missions::CompletionOutcome;
use crate::missions::today::{current_mission, TodayMission};
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/missions/today
/// Returns the user's current mission, or `null` when there is no active
/// plan or everything is completed.
pub async fn handle_today(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Option<TodayMission>>, AppError> {
    let mission = current_mission(&state.db, params.user_id).await?;
    Ok(Json(mission))
}

#[derive(Debug, Deserialize)]
pub struct CompleteMissionRequest {
    pub user_id: Uuid,
}

/// POST /api/v1/missions/:id/complete
pub async fn handle_complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteMissionRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = complete_mission(&state.db, id, req.user_id, Utc::now()).await?;
    if outcome == CompletionOutcome::AlreadyCompleted {
        debug!("Mission {id} was already completed; idempotent success");
    }
    Ok(Json(json!({ "ok": true })))
}
