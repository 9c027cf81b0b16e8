//! Mission completion: one transaction covering the status flip, the
//! progress event append, and the streak upsert. A crash cannot leave a
//! mission completed without its event and streak update.

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::missions::streak::advance_streak;
use crate::missions::{completion_outcome, CompletionOutcome, MissionStatus};

const MISSION_COMPLETED: &str = "mission_completed";

/// Completes a mission on behalf of `user_id`.
///
/// A mission belonging to another user is indistinguishable from a missing
/// one (`NotFound`). Completing an already-completed mission is idempotent
/// success: no second event, no streak double-count.
pub async fn complete_mission(
    pool: &PgPool,
    mission_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<CompletionOutcome, AppError> {
    let mut tx = pool.begin().await?;

    // Lock the row so concurrent completions serialize on the status read.
    let status: Option<String> = sqlx::query_scalar(
        r#"
        SELECT m.status
        FROM missions m
        JOIN plan_weeks w ON w.id = m.plan_week_id
        JOIN plans p ON p.id = w.plan_id
        WHERE m.id = $1 AND p.user_id = $2
        FOR UPDATE OF m
        "#,
    )
    .bind(mission_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let status = status.ok_or_else(|| AppError::NotFound(format!("Mission {mission_id} not found")))?;
    let status = MissionStatus::parse(&status)?;

    if completion_outcome(status)? == CompletionOutcome::AlreadyCompleted {
        return Ok(CompletionOutcome::AlreadyCompleted);
    }

    sqlx::query("UPDATE missions SET status = 'completed', completed_at = $2 WHERE id = $1")
        .bind(mission_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    // Most recent prior completion, from the append-only log.
    let last_completed: Option<DateTime<Utc>> = sqlx::query_scalar(
        "SELECT MAX(created_at) FROM progress_events WHERE user_id = $1 AND type = $2",
    )
    .bind(user_id)
    .bind(MISSION_COMPLETED)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO progress_events (user_id, type, meta) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(MISSION_COMPLETED)
        .bind(json!({ "mission_id": mission_id }))
        .execute(&mut *tx)
        .await?;

    let counters: Option<(i32, i32)> =
        sqlx::query_as("SELECT current_streak, longest_streak FROM streaks WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
    let (current, longest) = counters.unwrap_or((0, 0));
    let update = advance_streak(current, longest, last_completed, now);

    sqlx::query(
        r#"
        INSERT INTO streaks (user_id, current_streak, longest_streak)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET current_streak = EXCLUDED.current_streak,
            longest_streak = EXCLUDED.longest_streak,
            updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(update.current)
    .bind(update.longest)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Mission {mission_id} completed by user {user_id} (streak {})",
        update.current
    );
    Ok(CompletionOutcome::Completed)
}
