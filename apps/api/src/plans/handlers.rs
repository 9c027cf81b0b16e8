use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::PLAN_DAYS;
use crate::queue::JobName;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub user_id: Uuid,
    pub goal_role_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CreatePlanResponse {
    #[serde(rename = "planId")]
    pub plan_id: Uuid,
}

/// POST /api/v1/plans
///
/// Creates the plan row (start = today, end = start + 90 days, active) and
/// enqueues `generate-plan`. One active plan per user: checked here under a
/// transaction, with the partial unique index as the concurrent backstop.
pub async fn handle_create_plan(
    State(state): State<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> Result<Json<CreatePlanResponse>, AppError> {
    let goal_role_id = req
        .goal_role_id
        .ok_or_else(|| AppError::Validation("goal_role_id is required".to_string()))?;

    let start = Utc::now().date_naive();
    let end = start + Duration::days(PLAN_DAYS);

    let mut tx = state.db.begin().await?;

    let active: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM plans WHERE user_id = $1 AND status = 'active'")
            .bind(req.user_id)
            .fetch_optional(&mut *tx)
            .await?;
    if active.is_some() {
        return Err(AppError::Validation(
            "user already has an active plan".to_string(),
        ));
    }

    let plan_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO plans (user_id, goal_role_id, start_date, end_date, status)
        VALUES ($1, $2, $3, $4, 'active')
        RETURNING id
        "#,
    )
    .bind(req.user_id)
    .bind(goal_role_id)
    .bind(start)
    .bind(end)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_active_plan_conflict)?;

    tx.commit().await?;

    state
        .queue
        .enqueue(
            JobName::GeneratePlan,
            json!({
                "planId": plan_id,
                "userId": req.user_id,
                "goalRoleId": goal_role_id
            }),
        )
        .await?;

    info!("Created plan {plan_id} for user {}", req.user_id);
    Ok(Json(CreatePlanResponse { plan_id }))
}

/// Two concurrent creates can both pass the application check; the partial
/// unique index rejects the loser, which we report like the check would have.
fn map_active_plan_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some("plans_one_active_per_user") {
            return AppError::Validation("user already has an active plan".to_string());
        }
    }
    AppError::Database(err)
}
