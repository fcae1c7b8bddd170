// Storage Layout - mapping queue and message identity onto the directory tree
//
// Contract preserved for external tooling reading the store directly:
// one directory per queue named by queue ID, a fixed-name descriptor file
// inside it, plus one `<messageId>.json` file per message.

use std::path::{Path, PathBuf};

/// Fixed name of the per-queue descriptor file
pub const METADATA_FILE: &str = "metadata.json";

/// Subdirectory of the storage root holding all queue directories
pub const QUEUE_DIR: &str = "queue";

const MESSAGE_EXT: &str = "json";

#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn queues_dir(&self) -> PathBuf {
        self.root.join(QUEUE_DIR)
    }

    pub fn queue_dir(&self, queue_id: &str) -> PathBuf {
        self.queues_dir().join(queue_id)
    }

    pub fn metadata_path(&self, queue_id: &str) -> PathBuf {
        self.queue_dir(queue_id).join(METADATA_FILE)
    }

    pub fn message_path(&self, queue_id: &str, message_id: &str) -> PathBuf {
        self.queue_dir(queue_id)
            .join(format!("{message_id}.{MESSAGE_EXT}"))
    }
}

pub async fn dir_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
