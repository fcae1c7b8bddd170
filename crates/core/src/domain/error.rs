// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("message {0} was never delivered")]
    NeverLeased(String),

    #[error("lease on message {0} has expired, ack must arrive within the visibility timeout")]
    LeaseExpired(String),

    #[error("deadline must be at least {min}s in the future, got a lead of {got}s")]
    DeadlineTooSoon { min: i64, got: i64 },
}

pub type Result<T> = std::result::Result<T, DomainError>;
