use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stride::build_s3_client;
use stride::config::Config;
use stride::db::create_pool;
use stride::llm_client::LlmClient;
use stride::queue::consumer::{self, WorkerContext};
use stride::queue::redis::RedisQueue;
use stride::storage::S3Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Stride worker v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;
    let queue = Arc::new(RedisQueue::new(redis));

    let s3 = build_s3_client(&config).await;
    let storage = Arc::new(S3Storage::new(s3, config.s3_bucket.clone()));

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", stride::llm_client::MODEL);

    consumer::run(WorkerContext {
        db,
        queue,
        storage,
        llm,
    })
    .await
}
