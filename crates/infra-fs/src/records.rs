// Message Record Persistence (one JSON file per message)

use std::io::ErrorKind;

use filemq_core::domain::MessageRecord;
use filemq_core::error::{AppError, Result};

use crate::layout::StorageLayout;

pub async fn write_record(layout: &StorageLayout, record: &MessageRecord) -> Result<()> {
    let path = layout.message_path(&record.queue_id, &record.id);
    let buf = serde_json::to_vec(record)?;
    tokio::fs::write(&path, buf).await?;
    Ok(())
}

pub async fn read_record(
    layout: &StorageLayout,
    queue_id: &str,
    message_id: &str,
) -> Result<MessageRecord> {
    let path = layout.message_path(queue_id, message_id);
    let buf = match tokio::fs::read(&path).await {
        Ok(buf) => buf,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "message {message_id} in queue {queue_id}"
            )));
        }
        Err(err) => return Err(err.into()),
    };

    serde_json::from_slice(&buf)
        .map_err(|err| AppError::Corrupt(format!("message record {}: {err}", path.display())))
}

/// Remove a message file. Used for explicit acknowledgment and for garbage
/// collection of terminal records; removing an already-gone file succeeds.
pub async fn delete_record(layout: &StorageLayout, queue_id: &str, message_id: &str) -> Result<()> {
    let path = layout.message_path(queue_id, message_id);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
