//! Object storage collaborator: uploaded resume blobs live in S3 (MinIO
//! locally). Behind a trait so workers can be exercised without a bucket.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Writes an object under `key`.
    async fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), AppError>;

    /// Resolves `key` to a time-limited readable URL.
    async fn resolve_readable_url(&self, key: &str, ttl_secs: u64) -> Result<String, AppError>;
}

pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("S3 upload failed: {e}")))?;

        debug!("Uploaded object s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn resolve_readable_url(&self, key: &str, ttl_secs: u64) -> Result<String, AppError> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|e| AppError::StorageUnavailable(format!("Bad presign TTL: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("S3 presign failed: {e}")))?;

        Ok(presigned.uri().to_string())
    }
}
