use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::queue::JobQueue;
use crate::storage::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
/// The queue and storage collaborators sit behind traits so tests can swap in
/// fakes without a broker or a bucket.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub queue: Arc<dyn JobQueue>,
    pub storage: Arc<dyn Storage>,
    pub config: Config,
}
