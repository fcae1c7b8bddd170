// File-backed QueueStore Implementation

use std::io::ErrorKind;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::SecondsFormat;
use tracing::{debug, info, warn};

use filemq_core::application::{plan_poll, slice_page, total_pages};
use filemq_core::domain::{validate_deadline, Message, MessageId, MessageRecord, Queue, QueueId};
use filemq_core::error::{AppError, Result};
use filemq_core::port::{
    CreateQueueRequest, EnqueueRequest, IdProvider, ListQueuesRequest, QueuePage, QueueStore,
    TimeProvider,
};

use crate::config::StoreConfig;
use crate::layout::{dir_exists, StorageLayout, METADATA_FILE};
use crate::{metadata, records};

/// Local-mode queue backend: every queue is a directory under the store
/// root, every message a JSON file inside it.
///
/// No locking beyond per-file write atomicity; see `QueueStore::poll` for
/// the accepted scan-then-write race window.
pub struct FsQueueStore {
    layout: StorageLayout,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl FsQueueStore {
    /// Open a store over `config.root`, creating the queue tree when absent.
    pub async fn open(
        config: StoreConfig,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let layout = StorageLayout::new(config.root);
        tokio::fs::create_dir_all(layout.queues_dir()).await?;
        Ok(Self {
            layout,
            id_provider,
            time_provider,
        })
    }

    /// Scan every queue directory and parse its descriptor. Unreadable or
    /// unparsable descriptors are skipped, not fatal.
    async fn scan_descriptors(&self) -> Result<Vec<Queue>> {
        let mut queues = Vec::new();
        let mut entries = tokio::fs::read_dir(self.layout.queues_dir()).await?;

        while let Some(entry) = entries.next_entry().await? {
            let is_dir = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            let queue_id = entry.file_name().to_string_lossy().into_owned();
            match metadata::read_descriptor(&self.layout, &queue_id).await {
                Ok(queue) => queues.push(queue),
                Err(err) => {
                    debug!(queue_id = %queue_id, error = %err, "skipping unreadable descriptor");
                }
            }
        }

        Ok(queues)
    }

    async fn name_exists(&self, name: &str) -> Result<bool> {
        Ok(self
            .scan_descriptors()
            .await?
            .iter()
            .any(|queue| queue.name == name))
    }

    /// Read every message record in the queue directory, skipping the
    /// descriptor file.
    async fn scan_records(&self, queue_id: &str) -> Result<Vec<MessageRecord>> {
        let mut scanned = Vec::new();
        let mut entries = tokio::fs::read_dir(self.layout.queue_dir(queue_id)).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name() == METADATA_FILE || entry.file_type().await?.is_dir() {
                continue;
            }

            let path = entry.path();
            let buf = tokio::fs::read(&path).await?;
            let record = serde_json::from_slice(&buf).map_err(|err| {
                AppError::Corrupt(format!("message record {}: {err}", path.display()))
            })?;
            scanned.push(record);
        }

        Ok(scanned)
    }
}

#[async_trait]
impl QueueStore for FsQueueStore {
    async fn create_queue(&self, req: CreateQueueRequest) -> Result<QueueId> {
        if req.name.is_empty() {
            return Err(AppError::InvalidArgument(
                "queue name must not be empty".to_string(),
            ));
        }
        if self.name_exists(&req.name).await? {
            return Err(AppError::AlreadyExists(format!("queue {}", req.name)));
        }

        let queue_id = self.id_provider.generate_id();
        tokio::fs::create_dir_all(self.layout.queue_dir(&queue_id)).await?;

        let created_at = self
            .time_provider
            .now()
            .to_rfc3339_opts(SecondsFormat::Nanos, true);
        let queue = Queue::new(
            queue_id.clone(),
            req.name,
            req.description,
            req.run_id,
            req.actor_id,
            created_at,
        );
        metadata::write_descriptor(&self.layout, &queue).await?;

        info!(queue_id = %queue_id, name = %queue.name, "queue created");
        Ok(queue_id)
    }

    async fn get_queue(&self, queue_id: &str) -> Result<Queue> {
        metadata::read_descriptor(&self.layout, queue_id).await
    }

    async fn list_queues(&self, req: ListQueuesRequest) -> Result<QueuePage> {
        let mut queues = self.scan_descriptors().await?;
        queues.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        if req.desc {
            queues.reverse();
        }

        let total = queues.len() as u64;
        let items = slice_page(queues, req.page, req.page_size);

        Ok(QueuePage {
            items,
            total,
            page: req.page,
            page_size: req.page_size,
            total_page: total_pages(total, req.page_size),
        })
    }

    async fn update_queue(&self, queue_id: &str, name: &str, description: &str) -> Result<()> {
        if !dir_exists(&self.layout.queue_dir(queue_id)).await {
            // soft no-op, matching the managed service's update semantics
            return Ok(());
        }

        let mut queue = metadata::read_descriptor(&self.layout, queue_id).await?;
        queue.name = name.to_string();
        queue.description = description.to_string();
        metadata::write_descriptor(&self.layout, &queue).await
    }

    async fn delete_queue(&self, queue_id: &str) -> Result<()> {
        match tokio::fs::remove_dir_all(self.layout.queue_dir(queue_id)).await {
            Ok(()) => {
                info!(queue_id = %queue_id, "queue deleted");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn enqueue(&self, req: EnqueueRequest) -> Result<MessageId> {
        let now = self.time_provider.now();
        validate_deadline(req.deadline, now)?;

        if !dir_exists(&self.layout.queue_dir(&req.queue_id)).await {
            return Err(AppError::NotFound(format!("queue {}", req.queue_id)));
        }

        let message_id = self.id_provider.generate_id();
        let record = MessageRecord::new(
            message_id.clone(),
            req.queue_id,
            req.name,
            req.payload,
            req.desc,
            req.deadline,
            req.retry,
            req.timeout,
            now,
        );
        records::write_record(&self.layout, &record).await?;

        debug!(queue_id = %record.queue_id, message_id = %message_id, "message enqueued");
        Ok(message_id)
    }

    async fn poll(&self, queue_id: &str, limit: usize) -> Result<Vec<Message>> {
        let now = self.time_provider.now();
        if !dir_exists(&self.layout.queue_dir(queue_id)).await {
            return Err(AppError::NotFound(format!("queue {queue_id}")));
        }

        let scanned = self.scan_records(queue_id).await?;
        let scanned_count = scanned.len();
        let plan = plan_poll(scanned, now, limit);

        for message_id in &plan.purge {
            if let Err(err) = records::delete_record(&self.layout, queue_id, message_id).await {
                // terminal record stays on disk; the next scan sweeps it again
                warn!(queue_id = %queue_id, message_id = %message_id, error = %err,
                    "failed to purge terminal message");
            }
        }

        // the lease grant must land on disk before the caller sees the message
        for record in &plan.lease {
            records::write_record(&self.layout, record).await?;
        }

        debug!(
            queue_id = %queue_id,
            scanned = scanned_count,
            leased = plan.lease.len(),
            purged = plan.purge.len(),
            "poll complete"
        );
        Ok(plan.lease.iter().map(Message::from).collect())
    }

    async fn ack(&self, queue_id: &str, message_id: &str) -> Result<()> {
        let now = self.time_provider.now();
        let record = records::read_record(&self.layout, queue_id, message_id).await?;
        record.ensure_ackable(now)?;
        records::delete_record(&self.layout, queue_id, message_id).await?;

        debug!(queue_id = %queue_id, message_id = %message_id, "message acknowledged");
        Ok(())
    }
}
