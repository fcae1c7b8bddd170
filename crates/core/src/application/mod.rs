// Application Layer - Backend-independent queue logic

pub mod lease;
pub mod paging;

// Re-exports
pub use lease::{plan_poll, PollPlan};
pub use paging::{slice_page, total_pages};
