// filemq Core - Domain Logic & Ports
// NO storage dependencies: backends live behind the QueueStore port

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
