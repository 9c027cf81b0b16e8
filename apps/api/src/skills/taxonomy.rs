//! Atomic writes against the global skill catalog and per-user proficiency.
//!
//! Both operations are single statements keyed by unique constraints, so
//! concurrent workers (same job redelivered, or two parses for one user)
//! cannot duplicate rows. Never read-then-write here.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;

/// Looks up a skill by case-insensitive exact name, creating it on first
/// sighting. Returns the canonical id either way.
///
/// The no-op `DO UPDATE` makes `RETURNING` total: with `DO NOTHING`, a
/// conflicting row committed by a concurrent worker after our snapshot
/// yields zero rows. Keeping `skills.name` preserves first-sighting casing.
pub async fn find_or_create_skill(pool: &PgPool, name: &str) -> Result<Uuid, AppError> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO skills (name) VALUES ($1)
        ON CONFLICT ((lower(name))) DO UPDATE SET name = skills.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Upserts a user's proficiency for a skill. A conflict overwrites the level:
/// reparsing a resume replaces prior estimates, it does not average them.
pub async fn upsert_user_skill(
    pool: &PgPool,
    user_id: Uuid,
    skill_id: Uuid,
    level: i16,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_skills (user_id, skill_id, level)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, skill_id)
        DO UPDATE SET level = EXCLUDED.level, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(skill_id)
    .bind(level)
    .execute(pool)
    .await?;

    Ok(())
}
