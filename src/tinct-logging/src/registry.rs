//! Registry of loggers by ID.
//!
//! The registry is an ordinary value: create one at startup and pass it (or a
//! [`SharedRegistry`]) to whatever needs to look loggers up.
//!
//! ```
//! use tinct_logging::{Logger, LoggerRegistry, MemoryTarget};
//!
//! let mut registry = LoggerRegistry::new();
//! let app = registry.register(Logger::new("app", "App")).unwrap();
//! app.sub_logger("db", "Database").unwrap();
//!
//! assert!(registry.get("app.db").is_some());
//! assert!(registry.register(Logger::new("app", "Again")).is_err());
//! ```

use crate::error::{LoggingError, Result};
use crate::logger::{Logger, validate_id};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

/// A registry shared between threads.
pub type SharedRegistry = Arc<Mutex<LoggerRegistry>>;

/// Maps logger IDs to root loggers. Sub-loggers are reachable as `root.child`.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: BTreeMap<String, Logger>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Adds a root logger under its ID.
    ///
    /// # Errors
    ///
    /// - [`LoggingError::InvalidId`] if the ID is empty or contains `.`.
    /// - [`LoggingError::DuplicateId`] if a root logger already has the ID.
    pub fn register(&mut self, logger: Logger) -> Result<&mut Logger> {
        let id = logger.id().to_string();
        validate_id(&id)?;
        match self.loggers.entry(id) {
            Entry::Occupied(entry) => Err(LoggingError::DuplicateId {
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                tracing::debug!(logger = %entry.key(), "registered logger");
                Ok(entry.insert(logger))
            }
        }
    }

    /// Shorthand for registering [`Logger::new`].
    pub fn create(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<&mut Logger> {
        self.register(Logger::new(id, name))
    }

    pub fn get(&self, id: &str) -> Option<&Logger> {
        match id.split_once('.') {
            Some((root, rest)) => self.loggers.get(root)?.descendant(rest),
            None => self.loggers.get(id),
        }
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Logger> {
        match id.split_once('.') {
            Some((root, rest)) => self.loggers.get_mut(root)?.descendant_mut(rest),
            None => self.loggers.get_mut(id),
        }
    }

    /// Like [`LoggerRegistry::get_mut`], but fails with [`LoggingError::UnknownLogger`].
    pub fn require(&mut self, id: &str) -> Result<&mut Logger> {
        self.get_mut(id)
            .ok_or_else(|| LoggingError::UnknownLogger(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Removes a logger or sub-logger and hands it back. Dropping it closes it.
    pub fn unregister(&mut self, id: &str) -> Option<Logger> {
        match id.split_once('.') {
            Some((root, rest)) => self.loggers.get_mut(root)?.remove_descendant(rest),
            None => self.loggers.remove(id),
        }
    }

    /// Every registered ID, sub-loggers included, sorted by root.
    pub fn ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (id, logger) in &self.loggers {
            ids.push(id.clone());
            ids.extend(logger.descendant_ids());
        }
        ids
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Logger> {
        self.loggers.values()
    }

    /// Closes and removes every logger. Returns the first error, after closing all.
    pub fn close_all(&mut self) -> Result<()> {
        let mut first_error = None;
        for (_, mut logger) in std::mem::take(&mut self.loggers) {
            if let Err(error) = logger.close() {
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

}
