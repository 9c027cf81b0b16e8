#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_url: String,
    /// Written exactly once per parse; a reparse overwrites, never appends.
    pub parsed_json: Option<Value>,
    pub created_at: DateTime<Utc>,
}