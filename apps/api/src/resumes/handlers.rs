use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::queue::JobName;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    #[serde(rename = "resumeId")]
    pub resume_id: Uuid,
    pub status: &'static str,
}

/// POST /api/v1/resumes (multipart: `user_id`, `file`)
///
/// Stores the blob, creates the resume row, and enqueues `parse-resume`.
/// Returns 202: parsing is asynchronous.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResumeResponse>), AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable user_id field: {e}")))?;
                user_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?,
                );
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable file field: {e}")))?;
                file = Some((filename, content_type, bytes));
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or(AppError::Unauthorized)?;
    let (filename, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("missing file".to_string()))?;

    let key = format!(
        "resumes/{}/{}-{}",
        user_id,
        Utc::now().timestamp_millis(),
        filename
    );
    state.storage.put_object(&key, bytes, &content_type).await?;

    let resume_id: Uuid =
        sqlx::query_scalar("INSERT INTO resumes (user_id, file_url) VALUES ($1, $2) RETURNING id")
            .bind(user_id)
            .bind(&key)
            .fetch_one(&state.db)
            .await?;

    state
        .queue
        .enqueue(
            JobName::ParseResume,
            json!({
                "resumeId": resume_id,
                "userId": user_id,
                "filePath": key
            }),
        )
        .await?;

    info!("Queued resume {resume_id} for parsing (user {user_id})");
    Ok((
        StatusCode::ACCEPTED,
        Json(UploadResumeResponse {
            resume_id,
            status: "queued",
        }),
    ))
}
