use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::plan::PlanRow;
use crate::models::user::{ProfileRow, StreakRow};
use crate::routes::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub profile: Option<ProfileRow>,
    pub streak: Option<StreakRow>,
    #[serde(rename = "currentPlan")]
    pub current_plan: Option<PlanRow>,
}

/// GET /api/v1/me
pub async fn handle_me(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MeResponse>, AppError> {
    let profile: Option<ProfileRow> =
        sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
            .bind(params.user_id)
            .fetch_optional(&state.db)
            .await?;

    let streak: Option<StreakRow> = sqlx::query_as("SELECT * FROM streaks WHERE user_id = $1")
        .bind(params.user_id)
        .fetch_optional(&state.db)
        .await?;

    let current_plan: Option<PlanRow> = sqlx::query_as(
        r#"
        SELECT * FROM plans
        WHERE user_id = $1 AND status = 'active'
        ORDER BY start_date DESC
        LIMIT 1
        "#,
    )
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(Json(MeResponse {
        profile,
        streak,
        current_plan,
    }))
}
