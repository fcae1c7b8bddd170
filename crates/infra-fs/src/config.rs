// Store Configuration - explicit storage root handle

use std::path::PathBuf;

const DATA_DIR_ENV: &str = "FILEMQ_DATA_DIR";

/// Storage root for one store instance. Constructed explicitly and injected
/// into `FsQueueStore`; there is no process-wide path.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve from the environment: `FILEMQ_DATA_DIR` wins, otherwise the
    /// platform data directory.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let root = directories::ProjectDirs::from("", "", "filemq")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".filemq"));
        Self { root }
    }
}
