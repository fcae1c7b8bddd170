// Shared test fixtures
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use filemq_core::port::id_provider::UuidProvider;
use filemq_core::port::time_provider::mocks::MockTimeProvider;
use filemq_core::port::EnqueueRequest;
use filemq_infra_fs::{FsQueueStore, StoreConfig};

/// Start every scenario from the same fixed instant so lease horizons are
/// deterministic.
pub const EPOCH: i64 = 1_700_000_000;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn mock_clock() -> Arc<MockTimeProvider> {
    Arc::new(MockTimeProvider::at_epoch(EPOCH))
}

pub async fn open_store(root: &Path, clock: Arc<MockTimeProvider>) -> FsQueueStore {
    FsQueueStore::open(StoreConfig::new(root), Arc::new(UuidProvider), clock)
        .await
        .expect("store should open")
}

/// Enqueue request with a comfortable one-hour deadline.
pub fn enqueue_req(
    queue_id: &str,
    name: &str,
    now_secs: i64,
    retry: i32,
    timeout: i64,
) -> EnqueueRequest {
    EnqueueRequest {
        queue_id: queue_id.to_string(),
        name: name.to_string(),
        payload: r#"{"kind":"test"}"#.to_string(),
        desc: String::new(),
        deadline: now_secs + 3600,
        retry,
        timeout,
    }
}
