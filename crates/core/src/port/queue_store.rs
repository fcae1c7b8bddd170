// Queue Store Port (Interface)
//
// Both the local file-backed backend and a remote-service-backed client
// implement this contract, so callers stay agnostic to the backend choice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Message, MessageId, Queue, QueueId};
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQueueRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub run_id: String,
    #[serde(default)]
    pub actor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueRequest {
    pub queue_id: QueueId,
    pub name: String,
    /// Opaque serialized content
    pub payload: String,
    #[serde(default)]
    pub desc: String,
    /// Absolute expiry, Unix seconds; must lead "now" by at least
    /// `MIN_DEADLINE_LEAD_SECS`
    pub deadline: i64,
    /// Maximum delivery attempts
    pub retry: i32,
    /// Visibility timeout in seconds, applied on each delivery
    pub timeout: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListQueuesRequest {
    /// 1-indexed page number
    pub page: u64,
    pub page_size: u64,
    /// Sort by creation time descending instead of ascending
    #[serde(default)]
    pub desc: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuePage {
    pub items: Vec<Queue>,
    /// Pre-pagination count
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_page: u64,
}

/// Storage contract: the five queue operations plus the message operations.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Create a queue. Fails with `AlreadyExists` when another queue has the
    /// same name (case-sensitive). Returns the freshly generated queue ID.
    async fn create_queue(&self, req: CreateQueueRequest) -> Result<QueueId>;

    /// Fetch one queue descriptor, or `NotFound`.
    async fn get_queue(&self, queue_id: &str) -> Result<Queue>;

    /// List queue descriptors sorted by creation time. Unreadable
    /// descriptors are skipped; out-of-range pages return an empty slice.
    async fn list_queues(&self, req: ListQueuesRequest) -> Result<QueuePage>;

    /// Overwrite name/description only. Updating a missing queue is a
    /// soft no-op success.
    async fn update_queue(&self, queue_id: &str, name: &str, description: &str) -> Result<()>;

    /// Remove the queue and every message it contains. Deleting a missing
    /// queue is not an error.
    async fn delete_queue(&self, queue_id: &str) -> Result<()>;

    /// Persist a new message. Fails with `InvalidArgument` when the deadline
    /// lead time is too short, `NotFound` when the queue is missing.
    async fn enqueue(&self, req: EnqueueRequest) -> Result<MessageId>;

    /// Lease up to `limit` eligible messages, oldest-updated first. Each
    /// returned message is invisible to other pollers until its visibility
    /// timeout lapses; terminal messages found during the scan are purged.
    ///
    /// Best-effort, not linearizable: two pollers racing on the same queue
    /// can both observe a message as eligible between one's scan and its
    /// lease write.
    async fn poll(&self, queue_id: &str, limit: usize) -> Result<Vec<Message>>;

    /// Acknowledge a leased message, deleting it. `NotFound` when the
    /// message is absent or was never delivered, `LeaseExpired` when the
    /// ack arrives after the visibility timeout.
    async fn ack(&self, queue_id: &str, message_id: &str) -> Result<()>;
}
