//! Resume parse worker. Idempotent end to end: every step either overwrites
//! or upserts, so at-least-once redelivery replays cleanly.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::queue::consumer::WorkerContext;
use crate::skills::extract::{clamp_level, extract_skills};
use crate::skills::taxonomy::{find_or_create_skill, upsert_user_skill};

/// TTL for the presigned resume URL handed to the AI collaborator.
const SIGNED_URL_TTL_SECS: u64 = 600;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumePayload {
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub file_path: String,
}

/// Handles a `parse-resume` job.
///
/// Fails before any skill write on `StorageUnavailable`, `UpstreamUnavailable`
/// and `MalformedExtraction`; the dispatcher's retry is the recovery path.
pub async fn parse_resume(
    ctx: &WorkerContext,
    payload: ParseResumePayload,
) -> Result<(), AppError> {
    let url = ctx
        .storage
        .resolve_readable_url(&payload.file_path, SIGNED_URL_TTL_SECS)
        .await?;

    let extraction = extract_skills(&ctx.llm, &url).await?;

    // Overwrite-on-reparse, never append.
    sqlx::query("UPDATE resumes SET parsed_json = $2 WHERE id = $1")
        .bind(payload.resume_id)
        .bind(serde_json::to_value(&extraction).map_err(anyhow::Error::from)?)
        .execute(&ctx.db)
        .await?;

    for skill in &extraction.skills {
        let skill_id = find_or_create_skill(&ctx.db, skill.name.trim()).await?;
        upsert_user_skill(
            &ctx.db,
            payload.user_id,
            skill_id,
            clamp_level(skill.level),
        )
        .await?;
    }

    info!(
        "Parsed resume {} for user {}: {} skills",
        payload.resume_id,
        payload.user_id,
        extraction.skills.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_decodes_camel_case_keys() {
        let resume_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let payload: ParseResumePayload = serde_json::from_value(json!({
            "resumeId": resume_id,
            "userId": user_id,
            "filePath": "resumes/u1/1700000000-cv.pdf"
        }))
        .unwrap();

        assert_eq!(payload.resume_id, resume_id);
        assert_eq!(payload.user_id, user_id);
        assert_eq!(payload.file_path, "resumes/u1/1700000000-cv.pdf");
    }

    #[test]
    fn test_payload_rejects_missing_fields() {
        let result: Result<ParseResumePayload, _> =
            serde_json::from_value(json!({"resumeId": Uuid::new_v4()}));
        assert!(result.is_err());
    }
}
