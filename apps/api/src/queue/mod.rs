//! Durable job queue abstraction.
//!
//! Workers consume from a single Redis-backed list; the consumer loop
//! dispatches on `Job::name`. Delivery is at-least-once, so every handler
//! must be idempotent. The trait exists so tests can swap in
//! `InMemoryQueue` without a broker.

pub mod consumer;
pub mod memory;
pub mod redis;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// Job kinds routed by the worker's consumer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobName {
    ParseResume,
    GeneratePlan,
    ScheduleDaily,
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobName::ParseResume => "parse-resume",
            JobName::GeneratePlan => "generate-plan",
            JobName::ScheduleDaily => "schedule-daily",
        };
        f.write_str(s)
    }
}

/// Envelope persisted on the broker. The payload is opaque to the queue;
/// handlers deserialize it themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub name: JobName,
    pub payload: Value,
    /// Zero-based delivery attempt, incremented on each requeue.
    pub attempt: u32,
    /// Earliest dispatch time for a redelivered envelope. Backoff rides on
    /// the envelope itself so it survives a worker restart.
    #[serde(default)]
    pub not_before: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(name: JobName, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            payload,
            attempt: 0,
            not_before: None,
        }
    }

    /// Whether the envelope may be dispatched at `now`. Envelopes without a
    /// `not_before` are always due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.not_before.map(|t| t <= now).unwrap_or(true)
    }
}

/// The dispatcher contract: durably record intent (`enqueue`) and hand jobs
/// to a consumer (`dequeue`) at least once each.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Durably records the job and returns immediately.
    async fn enqueue(&self, name: JobName, payload: Value) -> Result<(), AppError>;

    /// Puts a previously dequeued envelope back on the queue (redelivery).
    async fn requeue(&self, job: Job) -> Result<(), AppError>;

    /// Blocks up to `timeout` for the next job. `None` means the queue was
    /// empty for the whole window.
    async fn dequeue(&self, timeout: Duration) -> Result<Option<Job>, AppError>;

    /// Acknowledges a dequeued job as done (success or permanent failure).
    async fn ack(&self, job: &Job) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_names_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&JobName::ParseResume).unwrap(),
            "\"parse-resume\""
        );
        assert_eq!(
            serde_json::to_string(&JobName::GeneratePlan).unwrap(),
            "\"generate-plan\""
        );
        assert_eq!(
            serde_json::to_string(&JobName::ScheduleDaily).unwrap(),
            "\"schedule-daily\""
        );
    }

    #[test]
    fn test_job_envelope_round_trips_payload_untouched() {
        let payload = json!({"resumeId": "abc", "nested": {"level": 3}});
        let job = Job::new(JobName::ParseResume, payload.clone());

        let raw = serde_json::to_string(&job).unwrap();
        let back: Job = serde_json::from_str(&raw).unwrap();

        assert_eq!(back.id, job.id);
        assert_eq!(back.name, JobName::ParseResume);
        assert_eq!(back.payload, payload);
        assert_eq!(back.attempt, 0);
    }

    #[test]
    fn test_new_job_starts_at_attempt_zero() {
        let job = Job::new(JobName::ScheduleDaily, json!({}));
        assert_eq!(job.attempt, 0);
        assert!(job.not_before.is_none());
    }

    #[test]
    fn test_fresh_job_is_always_due() {
        let job = Job::new(JobName::ParseResume, json!({}));
        assert!(job.is_due(Utc::now()));
    }

    #[test]
    fn test_deferred_job_becomes_due_at_its_timestamp() {
        let mut job = Job::new(JobName::ParseResume, json!({}));
        let at = Utc::now();
        job.not_before = Some(at + chrono::Duration::seconds(30));

        assert!(!job.is_due(at));
        assert!(job.is_due(at + chrono::Duration::seconds(30)));
        assert!(job.is_due(at + chrono::Duration::seconds(31)));
    }

    #[test]
    fn test_envelope_without_not_before_field_still_decodes() {
        // Envelopes enqueued before the field existed are still on brokers.
        let raw = format!(
            r#"{{"id":"{}","name":"generate-plan","payload":{{}},"attempt":2}}"#,
            Uuid::new_v4()
        );
        let job: Job = serde_json::from_str(&raw).unwrap();
        assert_eq!(job.attempt, 2);
        assert!(job.not_before.is_none());
    }
}
