// Domain Layer - Pure business logic and entities

pub mod error;
pub mod message;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use message::{
    validate_deadline, Disposition, Message, MessageId, MessageRecord, MIN_DEADLINE_LEAD_SECS,
};
pub use queue::{Queue, QueueId};
