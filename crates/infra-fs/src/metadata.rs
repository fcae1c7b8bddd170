// Queue Descriptor Persistence (Metadata Store)

use filemq_core::domain::Queue;
use filemq_core::error::{AppError, Result};

use crate::layout::{dir_exists, StorageLayout};

/// Overwrite the queue descriptor in place. Single-file replace; a crash
/// mid-write can leave a truncated descriptor, which listing skips and
/// reads report as `Corrupt`.
pub async fn write_descriptor(layout: &StorageLayout, queue: &Queue) -> Result<()> {
    let path = layout.metadata_path(&queue.id);
    let buf = serde_json::to_vec(queue)?;
    tokio::fs::write(&path, buf).await?;
    Ok(())
}

pub async fn read_descriptor(layout: &StorageLayout, queue_id: &str) -> Result<Queue> {
    if !dir_exists(&layout.queue_dir(queue_id)).await {
        return Err(AppError::NotFound(format!("queue {queue_id}")));
    }

    let path = layout.metadata_path(queue_id);
    let buf = tokio::fs::read(&path).await?;
    serde_json::from_slice(&buf)
        .map_err(|err| AppError::Corrupt(format!("descriptor {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(id: &str, name: &str) -> Queue {
        Queue::new(id, name, "", "", "", "2026-01-01T00:00:00.000000000Z")
    }

    #[tokio::test]
    async fn descriptor_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path());
        tokio::fs::create_dir_all(layout.queue_dir("q-1"))
            .await
            .unwrap();

        write_descriptor(&layout, &queue("q-1", "orders"))
            .await
            .unwrap();
        let read = read_descriptor(&layout, "q-1").await.unwrap();
        assert_eq!(read.name, "orders");
    }

    #[tokio::test]
    async fn missing_queue_dir_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path());

        let err = read_descriptor(&layout, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn unparsable_descriptor_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path());
        tokio::fs::create_dir_all(layout.queue_dir("q-1"))
            .await
            .unwrap();
        tokio::fs::write(layout.metadata_path("q-1"), b"{ truncated")
            .await
            .unwrap();

        let err = read_descriptor(&layout, "q-1").await.unwrap_err();
        assert!(matches!(err, AppError::Corrupt(_)));
    }

    #[tokio::test]
    async fn write_overwrites_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path());
        tokio::fs::create_dir_all(layout.queue_dir("q-1"))
            .await
            .unwrap();

        write_descriptor(&layout, &queue("q-1", "before"))
            .await
            .unwrap();
        write_descriptor(&layout, &queue("q-1", "after"))
            .await
            .unwrap();

        let read = read_descriptor(&layout, "q-1").await.unwrap();
        assert_eq!(read.name, "after");
    }
}
