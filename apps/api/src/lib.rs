pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod missions;
pub mod models;
pub mod plans;
pub mod queue;
pub mod resumes;
pub mod routes;
pub mod skills;
pub mod state;
pub mod storage;

use aws_config::Region;
use aws_sdk_s3::config::Credentials;

use crate::config::Config;

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
pub async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "stride-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
