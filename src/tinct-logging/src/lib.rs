//! Severity-filtered logging with pluggable targets.
//!
//! A [`Logger`] fans each message out to an ordered list of [`Target`]s if the
//! message's [`Severity`] passes the logger's level. Loggers live in an
//! explicit [`LoggerRegistry`] and may have sub-loggers whose names are
//! joined hierarchically in the output.
//!
//! # Examples
//!
//! ```
//! use tinct_logging::{Logger, LoggerRegistry, MemoryTarget, Severity};
//!
//! let capture = MemoryTarget::new();
//! let mut registry = LoggerRegistry::new();
//! let app = registry
//!     .register(Logger::new("app", "App").with_target(capture.clone()))
//!     .unwrap();
//!
//! app.set_level(Severity::Warning);
//! app.info("not shown");
//! app.warning("low disk space");
//!
//! assert_eq!(capture.messages(), vec!["low disk space"]);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod record;
pub mod registry;
pub mod severity;
pub mod target;
pub mod targets;

pub use config::LoggingConfig;
pub use error::{LoggingError, Result};
pub use format::LogFormat;
pub use logger::{LogCallback, Logger};
pub use record::LogRecord;
pub use registry::{LoggerRegistry, SharedRegistry};
pub use severity::Severity;
pub use target::{SharedTarget, Target, TargetId, TargetKind, shared};
pub use targets::{DEFAULT_LOG_FILE, FileTarget, MemoryTarget, TerminalTarget};
