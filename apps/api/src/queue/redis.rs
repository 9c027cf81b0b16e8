//! Redis-backed queue: one list for pending jobs, one for in-flight jobs.
//!
//! `dequeue` moves the envelope onto the processing list (BLMOVE) so a worker
//! crash mid-job leaves it visible for operator recovery instead of losing
//! it; `ack` removes it. Requeue pushes onto the pending list while ack only
//! touches the processing list, so pushing back an envelope identical to the
//! in-flight copy (a deferred redelivery) cannot remove the wrong one.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use redis::{AsyncCommands, Direction};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::AppError;
use crate::queue::{Job, JobName, JobQueue};

const JOBS_KEY: &str = "stride:jobs";
const PROCESSING_KEY: &str = "stride:jobs:processing";

pub struct RedisQueue {
    client: redis::Client,
}

impl RedisQueue {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(anyhow!("Redis connection failed: {e}")))
    }

    async fn push(&self, job: Job) -> Result<(), AppError> {
        let raw = serde_json::to_string(&job)
            .map_err(|e| AppError::Internal(anyhow!("Failed to serialize job: {e}")))?;
        let mut conn = self.conn().await?;
        conn.rpush::<_, _, ()>(JOBS_KEY, raw)
            .await
            .map_err(|e| AppError::Internal(anyhow!("Redis RPUSH failed: {e}")))?;
        debug!("Enqueued {} job {} (attempt {})", job.name, job.id, job.attempt);
        Ok(())
    }
}

#[async_trait]
impl JobQueue for RedisQueue {
    async fn enqueue(&self, name: JobName, payload: Value) -> Result<(), AppError> {
        self.push(Job::new(name, payload)).await
    }

    async fn requeue(&self, job: Job) -> Result<(), AppError> {
        self.push(job).await
    }

    async fn dequeue(&self, timeout: Duration) -> Result<Option<Job>, AppError> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn
            .blmove(
                JOBS_KEY,
                PROCESSING_KEY,
                Direction::Left,
                Direction::Right,
                timeout.as_secs_f64(),
            )
            .await
            .map_err(|e| AppError::Internal(anyhow!("Redis BLMOVE failed: {e}")))?;

        let raw = match raw {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str(&raw) {
            Ok(job) => Ok(Some(job)),
            Err(e) => {
                // An envelope we cannot parse can never be dispatched; drop it
                // from the processing list and surface the problem in logs.
                error!("Dropping unparseable job envelope: {e}");
                let _: Result<i64, _> = conn.lrem(PROCESSING_KEY, 1, &raw).await;
                Ok(None)
            }
        }
    }

    async fn ack(&self, job: &Job) -> Result<(), AppError> {
        let raw = serde_json::to_string(job)
            .map_err(|e| AppError::Internal(anyhow!("Failed to serialize job: {e}")))?;
        let mut conn = self.conn().await?;
        conn.lrem::<_, _, i64>(PROCESSING_KEY, 1, raw)
            .await
            .map_err(|e| AppError::Internal(anyhow!("Redis LREM failed: {e}")))?;
        Ok(())
    }
}
