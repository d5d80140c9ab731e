//! Loggers and sub-loggers.
//!
//! A [`Logger`] owns an ordered list of targets, each of which can be enabled
//! or disabled, and a maximum [`Severity`]. Sub-loggers copy the level and
//! target handles of their parent when created and are configured on their
//! own afterwards; the tree only affects naming and shutdown.

use crate::error::{LoggingError, Result};
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::target::{SharedTarget, Target, TargetId, TargetKind, shared};
use crate::targets::{DEFAULT_LOG_FILE, FileTarget, TerminalTarget};
use std::fmt;
use std::sync::Arc;

/// Observer invoked for every message, before severity filtering.
pub type LogCallback = Box<dyn FnMut(&LogRecord) + Send>;

#[derive(Clone)]
struct TargetEntry {
    id: TargetId,
    kind: TargetKind,
    target: SharedTarget,
    enabled: bool,
}

/// A named message sink that fans records out to its targets.
pub struct Logger {
    /// Registered ID; `parent.child` for sub-loggers.
    id: String,
    local_id: String,
    /// Names from the root logger down to this one.
    names: Vec<String>,
    level: Severity,
    targets: Vec<TargetEntry>,
    next_target: u64,
    on_log: Option<LogCallback>,
    children: Vec<Logger>,
    closed: bool,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("names", &self.names)
            .field("level", &self.level)
            .field("targets", &self.targets.len())
            .field("children", &self.children)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Logger {
    /// Creates a logger without targets at [`Severity::Info`].
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            local_id: id.clone(),
            id,
            names: vec![name.into()],
            level: Severity::default(),
            targets: Vec::new(),
            next_target: 0,
            on_log: None,
            children: Vec::new(),
            closed: false,
        }
    }

    /// Creates a logger writing to the terminal and to [`DEFAULT_LOG_FILE`]
    /// in the working directory.
    pub fn with_default_targets(id: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let file = FileTarget::create(DEFAULT_LOG_FILE)?;
        Ok(Self::new(id, name)
            .with_target(TerminalTarget::stdio())
            .with_target(file))
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_target<T: Target + 'static>(mut self, target: T) -> Self {
        self.add_target(target);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Names from the root logger down to this one.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    /// Changes the threshold of this logger only. Existing sub-loggers keep theirs.
    pub fn set_level(&mut self, level: Severity) {
        self.level = level;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

// ============================================================================
// Targets
// ============================================================================

impl Logger {
    /// Appends an enabled target and returns its handle.
    pub fn add_target<T: Target + 'static>(&mut self, target: T) -> TargetId {
        self.add_shared_target(shared(target))
    }

    /// Appends an already shared target, e.g. one used by several loggers.
    pub fn add_shared_target(&mut self, target: SharedTarget) -> TargetId {
        let kind = target.lock().kind();
        let id = TargetId(self.next_target);
        self.next_target += 1;
        tracing::debug!(logger = %self.id, target = %id, %kind, "added log target");
        self.targets.push(TargetEntry {
            id,
            kind,
            target,
            enabled: true,
        });
        id
    }

    /// Detaches a target. It is closed once no logger references it.
    pub fn remove_target(&mut self, id: TargetId) -> Result<SharedTarget> {
        let index = self
            .targets
            .iter()
            .position(|e| e.id == id)
            .ok_or(LoggingError::UnknownTarget(id))?;
        Ok(self.targets.remove(index).target)
    }

    pub fn target(&self, id: TargetId) -> Option<SharedTarget> {
        self.entry(id).ok().map(|e| Arc::clone(&e.target))
    }

    pub fn target_ids(&self) -> Vec<TargetId> {
        self.targets.iter().map(|e| e.id).collect()
    }

    /// Handles of every target of `kind`, in order.
    pub fn targets_of(&self, kind: &TargetKind) -> Vec<TargetId> {
        self.targets
            .iter()
            .filter(|e| &e.kind == kind)
            .map(|e| e.id)
            .collect()
    }

    pub fn set_target_enabled(&mut self, id: TargetId, enabled: bool) -> Result<()> {
        self.entry_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn is_target_enabled(&self, id: TargetId) -> Result<bool> {
        Ok(self.entry(id)?.enabled)
    }

    /// Enables or disables every target of `kind` and returns how many were changed.
    pub fn set_kind_enabled(&mut self, kind: &TargetKind, enabled: bool) -> Result<usize> {
        let mut count = 0;
        for entry in self.targets.iter_mut().filter(|e| &e.kind == kind) {
            entry.enabled = enabled;
            count += 1;
        }
        if count == 0 {
            return Err(LoggingError::NoTargetOfKind(kind.clone()));
        }
        Ok(count)
    }

    fn entry(&self, id: TargetId) -> Result<&TargetEntry> {
        self.targets
            .iter()
            .find(|e| e.id == id)
            .ok_or(LoggingError::UnknownTarget(id))
    }

    fn entry_mut(&mut self, id: TargetId) -> Result<&mut TargetEntry> {
        self.targets
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LoggingError::UnknownTarget(id))
    }
}

// ============================================================================
// Logging
// ============================================================================

impl Logger {
    /// Sets the observer called for every message, whatever its severity.
    pub fn on_log<F>(&mut self, callback: F)
    where
        F: FnMut(&LogRecord) + Send + 'static,
    {
        self.on_log = Some(Box::new(callback));
    }

    pub fn clear_on_log(&mut self) {
        self.on_log = None;
    }

    /// Sends a message to every enabled target if `severity` passes the level,
    /// then hands it to the observer whatever its severity.
    ///
    /// A failing target is reported through `tracing` and skipped.
    pub fn log(&mut self, severity: Severity, message: impl fmt::Display) {
        if self.closed {
            tracing::debug!(logger = %self.id, "message dropped by closed logger");
            return;
        }

        let record = LogRecord::new(severity, message.to_string(), &self.id, self.names.clone());
        if self.level.allows(severity) {
            for entry in self.targets.iter().filter(|e| e.enabled) {
                if let Err(error) = entry.target.lock().write(&record) {
                    tracing::warn!(
                        logger = %self.id,
                        target = %entry.id,
                        kind = %entry.kind,
                        %error,
                        "log target write failed"
                    );
                }
            }
        }

        // The observer sees every message, after the targets.
        if let Some(callback) = self.on_log.as_mut() {
            callback(&record);
        }
    }

    pub fn fatal(&mut self, message: impl fmt::Display) {
        self.log(Severity::Fatal, message);
    }

    pub fn error(&mut self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    pub fn warning(&mut self, message: impl fmt::Display) {
        self.log(Severity::Warning, message);
    }

    pub fn message(&mut self, message: impl fmt::Display) {
        self.log(Severity::Message, message);
    }

    pub fn info(&mut self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    pub fn debug(&mut self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    pub fn trace(&mut self, message: impl fmt::Display) {
        self.log(Severity::Trace, message);
    }

    /// Flushes every target.
    pub fn flush(&self) -> Result<()> {
        for entry in &self.targets {
            entry.target.lock().flush()?;
        }
        Ok(())
    }
}

// ============================================================================
// Sub-loggers
// ============================================================================

impl Logger {
    /// Creates a sub-logger registered as `{self.id}.{id}`.
    ///
    /// The child starts with this logger's level and targets. It has no observer.
    ///
    /// # Errors
    ///
    /// - [`LoggingError::InvalidId`] if `id` is empty or contains `.`.
    /// - [`LoggingError::DuplicateId`] if a direct child already uses `id`.
    pub fn sub_logger(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&mut Logger> {
        let local_id = id.into();
        validate_id(&local_id)?;
        let full_id = format!("{}.{}", self.id, local_id);
        if self.child(&local_id).is_some() {
            return Err(LoggingError::DuplicateId { id: full_id });
        }

        let mut names = self.names.clone();
        names.push(name.into());
        tracing::debug!(logger = %full_id, "created sub-logger");

        let index = self.children.len();
        self.children.push(Logger {
            id: full_id,
            local_id,
            names,
            level: self.level,
            targets: self.targets.clone(),
            next_target: self.next_target,
            on_log: None,
            children: Vec::new(),
            closed: false,
        });
        Ok(&mut self.children[index])
    }

    /// Direct sub-logger with local ID `id`.
    pub fn child(&self, id: &str) -> Option<&Logger> {
        self.children.iter().find(|c| c.local_id == id)
    }

    pub fn child_mut(&mut self, id: &str) -> Option<&mut Logger> {
        self.children.iter_mut().find(|c| c.local_id == id)
    }

    pub fn children(&self) -> &[Logger] {
        &self.children
    }

    /// Looks up a descendant by a dotted path relative to this logger.
    pub fn descendant(&self, path: &str) -> Option<&Logger> {
        if let Some(child) = self.child(path) {
            return Some(child);
        }
        self.children.iter().find_map(|c| {
            path.strip_prefix(c.local_id.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .and_then(|rest| c.descendant(rest))
        })
    }

    pub fn descendant_mut(&mut self, path: &str) -> Option<&mut Logger> {
        let index = self.children.iter().position(|c| c.local_id == path);
        if let Some(index) = index {
            return Some(&mut self.children[index]);
        }
        self.children.iter_mut().find_map(|c| {
            let rest = path
                .strip_prefix(c.local_id.as_str())
                .and_then(|rest| rest.strip_prefix('.'))?;
            c.descendant_mut(rest)
        })
    }

    /// Detaches a descendant. Dropping it closes it.
    pub fn remove_descendant(&mut self, path: &str) -> Option<Logger> {
        if let Some(index) = self.children.iter().position(|c| c.local_id == path) {
            return Some(self.children.remove(index));
        }
        self.children.iter_mut().find_map(|c| {
            let rest = path
                .strip_prefix(c.local_id.as_str())
                .and_then(|rest| rest.strip_prefix('.'))?;
            c.remove_descendant(rest)
        })
    }

    /// Full IDs of every descendant, depth first.
    pub fn descendant_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for child in &self.children {
            ids.push(child.id.clone());
            ids.extend(child.descendant_ids());
        }
        ids
    }
}

/// Checks one segment of a logger ID. Segments are joined with `.`, so they
/// cannot contain it.
pub(crate) fn validate_id(id: &str) -> Result<()> {
    let reason = if id.is_empty() {
        "logger IDs cannot be empty"
    } else if id.contains('.') {
        "`.` separates sub-logger IDs"
    } else {
        return Ok(());
    };
    Err(LoggingError::InvalidId {
        id: id.to_string(),
        reason,
    })
}

// ============================================================================
// Shutdown
// ============================================================================

impl Logger {
    /// Closes sub-loggers depth first, then this logger's targets.
    ///
    /// A target still referenced elsewhere (by a logger outside this tree or a
    /// handle from [`Logger::target`]) is flushed instead of closed. Further
    /// messages are dropped. Returns the first error, after attempting all.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        tracing::debug!(logger = %self.id, "closing logger");

        let mut first_error = None;
        for child in &mut self.children {
            if let Err(error) = child.close() {
                first_error.get_or_insert(error);
            }
        }

        for entry in self.targets.drain(..) {
            let result = if Arc::strong_count(&entry.target) == 1 {
                entry.target.lock().close()
            } else {
                entry.target.lock().flush()
            };
            if let Err(error) = result {
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::warn!(logger = %self.id, %error, "failed to close logger");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::MemoryTarget;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    struct Failing;

    impl Target for Failing {
        fn kind(&self) -> TargetKind {
            TargetKind::Custom("failing".into())
        }

        fn write(&mut self, _record: &LogRecord) -> Result<()> {
            Err(LoggingError::TargetClosed)
        }
    }

    fn logger() -> (Logger, MemoryTarget) {
        let memory = MemoryTarget::new();
        let logger = Logger::new("app", "App").with_target(memory.clone());
        (logger, memory)
    }

    #[test]
    fn test_severity_filtering() {
        let (mut logger, memory) = logger();
        logger.set_level(Severity::Warning);

        logger.trace("t");
        logger.info("i");
        logger.warning("w");
        logger.fatal("f");

        assert_eq!(memory.messages(), vec!["w", "f"]);
    }

    #[test]
    fn test_observer_sees_filtered_messages() {
        let (mut logger, memory) = logger();
        logger.set_level(Severity::Error);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger.on_log(move |r| sink.lock().push(r.severity));

        logger.debug("d");
        logger.error("e");

        assert_eq!(*seen.lock(), vec![Severity::Debug, Severity::Error]);
        assert_eq!(memory.messages(), vec!["e"]);
    }

    #[test]
    fn test_observer_runs_after_targets() {
        let (mut logger, memory) = logger();
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);
        let probe = memory.clone();
        logger.on_log(move |_| sink.lock().push(probe.len()));

        logger.info("one");
        logger.trace("filtered");

        assert_eq!(*written.lock(), vec![1, 1]);
    }

    #[test]
    fn test_disabled_target_skipped() {
        let (mut logger, memory) = logger();
        let second = MemoryTarget::new();
        let id = logger.add_target(second.clone());

        logger.set_target_enabled(id, false).unwrap();
        logger.info("one");
        assert!(!logger.is_target_enabled(id).unwrap());
        logger.set_target_enabled(id, true).unwrap();
        logger.info("two");

        assert_eq!(memory.messages(), vec!["one", "two"]);
        assert_eq!(second.messages(), vec!["two"]);
    }

    #[test]
    fn test_failing_target_does_not_stop_others() {
        let memory = MemoryTarget::new();
        let mut logger = Logger::new("app", "App")
            .with_target(Failing)
            .with_target(memory.clone());
        logger.info("still delivered");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_targets_by_kind() {
        let (mut logger, _) = logger();
        let failing = logger.add_target(Failing);

        assert_eq!(logger.targets_of(&TargetKind::Memory).len(), 1);
        assert_eq!(
            logger.targets_of(&TargetKind::Custom("failing".into())),
            vec![failing]
        );
        assert_eq!(logger.set_kind_enabled(&TargetKind::Memory, false).unwrap(), 1);
        assert!(matches!(
            logger.set_kind_enabled(&TargetKind::File, false),
            Err(LoggingError::NoTargetOfKind(TargetKind::File))
        ));
    }

    #[test]
    fn test_unknown_target() {
        let (mut logger, _) = logger();
        let id = logger.target_ids()[0];
        logger.remove_target(id).unwrap();
        assert!(matches!(
            logger.set_target_enabled(id, true),
            Err(LoggingError::UnknownTarget(missing)) if missing == id
        ));
        assert!(logger.target(id).is_none());
    }

    #[test]
    fn test_record_fields() {
        let (mut logger, memory) = logger();
        logger.message(format_args!("{} items", 3));
        let record = &memory.records()[0];
        assert_eq!(record.severity, Severity::Message);
        assert_eq!(record.message, "3 items");
        assert_eq!(record.logger_id, "app");
        assert_eq!(record.logger_name(), "App");
    }

    #[test]
    fn test_close_stops_logging() {
        let (mut logger, memory) = logger();
        logger.close().unwrap();
        assert!(logger.is_closed());
        assert!(memory.is_closed());
        logger.info("ignored");
        assert!(memory.is_empty());
        assert!(logger.close().is_ok());
    }

    #[test]
    fn test_drop_closes_targets() {
        let (logger, memory) = logger();
        drop(logger);
        assert!(memory.is_closed());
    }
}
