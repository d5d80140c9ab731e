//! In-memory capture of log records.

use crate::error::{LoggingError, Result};
use crate::record::LogRecord;
use crate::target::{Target, TargetKind};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Sink {
    records: Vec<LogRecord>,
    closed: bool,
}

/// Keeps every record it receives.
///
/// Clones share the same storage, so one clone can be attached to a logger
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryTarget {
    sink: Arc<Mutex<Sink>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.sink.lock().records.clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sink
            .lock()
            .records
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sink.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.sink.lock().records.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.sink.lock().closed
    }
}

impl Target for MemoryTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Memory
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let mut sink = self.sink.lock();
        if sink.closed {
            return Err(LoggingError::TargetClosed);
        }
        sink.records.push(record.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.sink.lock().closed = true;
        Ok(())
    }
}
