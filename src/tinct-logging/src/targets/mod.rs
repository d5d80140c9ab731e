//! Built-in log targets.

mod file;
mod memory;
mod terminal;

pub use file::{DEFAULT_LOG_FILE, FileTarget};
pub use memory::MemoryTarget;
pub use terminal::TerminalTarget;
