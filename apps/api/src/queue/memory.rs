//! In-memory queue for tests. Preserves the contract that matters to
//! callers: at-least-once delivery (requeue puts the job back) with no
//! exactly-once guarantee.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppError;
use crate::queue::{Job, JobName, JobQueue};

#[derive(Default)]
pub struct InMemoryQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JobQueue for InMemoryQueue {
    async fn enqueue(&self, name: JobName, payload: Value) -> Result<(), AppError> {
        self.jobs.lock().unwrap().push_back(Job::new(name, payload));
        Ok(())
    }

    async fn requeue(&self, job: Job) -> Result<(), AppError> {
        self.jobs.lock().unwrap().push_back(job);
        Ok(())
    }

    async fn dequeue(&self, _timeout: Duration) -> Result<Option<Job>, AppError> {
        Ok(self.jobs.lock().unwrap().pop_front())
    }

    async fn ack(&self, _job: &Job) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_dequeue_returns_jobs_in_enqueue_order() {
        let queue = InMemoryQueue::new();
        queue
            .enqueue(JobName::ParseResume, json!({"n": 1}))
            .await
            .unwrap();
        queue
            .enqueue(JobName::GeneratePlan, json!({"n": 2}))
            .await
            .unwrap();

        let first = queue.dequeue(Duration::ZERO).await.unwrap().unwrap();
        let second = queue.dequeue(Duration::ZERO).await.unwrap().unwrap();
        assert_eq!(first.name, JobName::ParseResume);
        assert_eq!(second.name, JobName::GeneratePlan);
        assert!(queue.dequeue(Duration::ZERO).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_requeue_redelivers_same_envelope() {
        let queue = InMemoryQueue::new();
        queue
            .enqueue(JobName::ParseResume, json!({"resumeId": "r1"}))
            .await
            .unwrap();

        let mut job = queue.dequeue(Duration::ZERO).await.unwrap().unwrap();
        let original_id = job.id;
        job.attempt += 1;
        queue.requeue(job).await.unwrap();

        let redelivered = queue.dequeue(Duration::ZERO).await.unwrap().unwrap();
        assert_eq!(redelivered.id, original_id);
        assert_eq!(redelivered.attempt, 1);
        assert_eq!(redelivered.payload, json!({"resumeId": "r1"}));
    }

    #[tokio::test]
    async fn test_empty_queue_dequeues_none() {
        let queue = InMemoryQueue::new();
        assert!(queue.dequeue(Duration::ZERO).await.unwrap().is_none());
        assert!(queue.is_empty());
    }
}
