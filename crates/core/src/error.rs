// Central Error Type for Queue Backends

use thiserror::Error;

use crate::domain::DomainError;

/// Application-level error type shared by every `QueueStore` backend
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Lease expired: {0}")]
    LeaseExpired(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Domain failures surface through the shared taxonomy so every backend
// reports the same error kinds for the same conditions.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NeverLeased(_) => AppError::NotFound(err.to_string()),
            DomainError::LeaseExpired(_) => AppError::LeaseExpired(err.to_string()),
            DomainError::DeadlineTooSoon { .. } => AppError::InvalidArgument(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn domain_errors_map_to_taxonomy() {
        let err: AppError = DomainError::NeverLeased("m1".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = DomainError::LeaseExpired("m1".to_string()).into();
        assert!(matches!(err, AppError::LeaseExpired(_)));

        let err: AppError = DomainError::DeadlineTooSoon { min: 300, got: 10 }.into();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
