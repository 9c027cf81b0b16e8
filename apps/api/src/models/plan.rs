#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Plan horizon, fixed at creation: 12 weeks of 5 missions over 90 days.
pub const PLAN_DAYS: i64 = 90;
pub const WEEKS_PER_PLAN: i16 = 12;
pub const MISSIONS_PER_WEEK: i16 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_role_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanWeekRow {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub week_number: i16,
    pub milestone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MissionRow {
    pub id: Uuid,
    pub plan_week_id: Uuid,
    pub position: i16,
    pub title: String,
    pub description: String,
    pub est_minutes: i32,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Plan lifecycle. Stored as TEXT; `active` is unique per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    Active,
    Completed,
    Abandoned,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
            PlanStatus::Abandoned => "abandoned",
        }
    }
}