//! Daily mission assignment (`schedule-daily` job, typically cron-enqueued).
//!
//! Promotes the next pending mission to `today` for every active plan that
//! has none. The existence guard and the promotion are one statement, so
//! concurrent deliveries cannot give a plan two `today` missions.

use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;

pub async fn assign_daily_missions(pool: &PgPool) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE missions SET status = 'today'
        WHERE id IN (
            SELECT DISTINCT ON (p.id) m.id
            FROM plans p
            JOIN plan_weeks w ON w.plan_id = p.id
            JOIN missions m ON m.plan_week_id = w.id
            WHERE p.status = 'active'
              AND m.status = 'pending'
              AND NOT EXISTS (
                  SELECT 1
                  FROM plan_weeks w2
                  JOIN missions m2 ON m2.plan_week_id = w2.id
                  WHERE w2.plan_id = p.id AND m2.status = 'today'
              )
            ORDER BY p.id, w.week_number, m.position, m.id
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Assigned {} daily missions", result.rows_affected());
    Ok(())
}
