//! Local sink implementations

pub mod console;
pub mod json;
pub mod memory;

pub use console::{format_line, ConsoleAppender};
pub use json::JsonAppender;
pub use memory::MemoryAppender;

pub use crate::core::Appender;
