//! Plan generator worker. Deterministic expansion, no external calls.
//!
//! Idempotence is structural: week creation is keyed by
//! `(plan_id, week_number)` and mission creation by
//! `(plan_week_id, position)`, with conflict-keyed inserts. A crash after
//! week 6 is recovered by re-running the same job, which fills in only what
//! is missing.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::WEEKS_PER_PLAN;
use crate::plans::templates::{milestone_label, mission_templates};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanPayload {
    pub plan_id: Uuid,
}

/// Handles a `generate-plan` job.
pub async fn generate_plan(pool: &PgPool, payload: GeneratePlanPayload) -> Result<(), AppError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plan_weeks WHERE plan_id = $1")
        .bind(payload.plan_id)
        .fetch_one(pool)
        .await?;

    if existing >= WEEKS_PER_PLAN as i64 {
        info!("Plan {} already expanded; nothing to do", payload.plan_id);
        return Ok(());
    }

    for week in 1..=WEEKS_PER_PLAN {
        let week_id = ensure_week(pool, payload.plan_id, week).await?;

        for template in mission_templates(week) {
            sqlx::query(
                r#"
                INSERT INTO missions (plan_week_id, position, title, description, est_minutes)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (plan_week_id, position) DO NOTHING
                "#,
            )
            .bind(week_id)
            .bind(template.position)
            .bind(&template.title)
            .bind(&template.description)
            .bind(template.est_minutes)
            .execute(pool)
            .await?;
        }
    }

    info!(
        "Expanded plan {} into {} weeks of missions",
        payload.plan_id, WEEKS_PER_PLAN
    );
    Ok(())
}

/// Creates the week row if absent and returns its id either way. `DO UPDATE`
/// rather than `DO NOTHING` so `RETURNING` always yields a row, even when a
/// concurrent expansion of the same plan wins the insert; the milestone text
/// is deterministic, so the overwrite changes nothing.
async fn ensure_week(pool: &PgPool, plan_id: Uuid, week: i16) -> Result<Uuid, AppError> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO plan_weeks (plan_id, week_number, milestone)
        VALUES ($1, $2, $3)
        ON CONFLICT (plan_id, week_number) DO UPDATE SET milestone = EXCLUDED.milestone
        RETURNING id
        "#,
    )
    .bind(plan_id)
    .bind(week)
    .bind(milestone_label(week))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_decodes_camel_case_plan_id() {
        let plan_id = Uuid::new_v4();
        let payload: GeneratePlanPayload =
            serde_json::from_value(json!({"planId": plan_id})).unwrap();
        assert_eq!(payload.plan_id, plan_id);
    }

    #[test]
    fn test_payload_tolerates_extra_fields() {
        // The creating handler also records userId and goalRoleId on the job;
        // the worker only needs planId.
        let payload: GeneratePlanPayload = serde_json::from_value(json!({
            "planId": Uuid::new_v4(),
            "userId": Uuid::new_v4(),
            "goalRoleId": Uuid::new_v4()
        }))
        .unwrap();
        assert!(!payload.plan_id.is_nil());
    }
}
