//! Appender implementations

pub mod console;
pub mod memory;

pub use console::ConsoleAppender;
pub use memory::{CapturedLine, MemoryAppender};

// Re-export trait for convenience
pub use crate::core::Appender;
