//! Log target abstraction.

use crate::error::Result;
use crate::record::LogRecord;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A sink that renders log records.
pub trait Target: Send {
    /// What kind of sink this is, used by [`Logger::targets_of`](crate::Logger::targets_of).
    fn kind(&self) -> TargetKind;

    fn write(&mut self, record: &LogRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Releases the underlying resource. Must tolerate being called twice.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }
}

/// A target shared between a logger and its sub-loggers.
pub type SharedTarget = Arc<Mutex<dyn Target>>;

/// Wraps a target so it can be shared.
pub fn shared<T: Target + 'static>(target: T) -> SharedTarget {
    Arc::new(Mutex::new(target))
}

/// Kinds of built-in targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Terminal,
    File,
    Memory,
    /// A user-defined target, identified by name.
    Custom(String),
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal => f.write_str("terminal"),
            Self::File => f.write_str("file"),
            Self::Memory => f.write_str("memory"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// Handle to a target attached to a logger, returned by
/// [`Logger::add_target`](crate::Logger::add_target).
///
/// Sub-loggers keep the handles of the targets they copied from their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub(crate) u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target #{}", self.0)
    }
}
