//! This module provides a bounded buffer for storing log entries.
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use tracing::Level;

/// Represents a single log entry with timestamp, level, module, and message.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// The timestamp when the log entry was created.
    pub timestamp: DateTime<Utc>,
    /// The log level (e.g., INFO, DEBUG, ERROR).
    pub level: Level,
    /// The module path where the log originated.
    pub module: String,
    /// The log message content.
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.module,
            self.message
        )
    }
}

/// A circular buffer of the most recent log entries.
pub struct LogBuffer {
    entries: Mutex<VecDeque<LogEntry>>,
    /// The maximum number of entries to store in the buffer.
    max_size: usize,
}

impl LogBuffer {
    /// Creates a new `LogBuffer`.
    ///
    /// # Arguments
    ///
    /// * `max_size` - The maximum number of entries to store in the buffer.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_size)),
            max_size,
        }
    }

    /// Adds a new log entry, evicting the oldest one when full.
    pub fn add_entry(&self, entry: LogEntry) {
        if self.max_size == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() >= self.max_size {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns the buffered entries at `level` or more severe, oldest first.
    pub fn entries_at_least(&self, level: Level) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|entry| entry.level <= level)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<LogEntry>> {
        // A panic while logging must not take the buffer down with it.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: Level, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            module: "runner".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let buffer = LogBuffer::new(2);
        buffer.add_entry(entry(Level::INFO, "one"));
        buffer.add_entry(entry(Level::INFO, "two"));
        buffer.add_entry(entry(Level::INFO, "three"));

        let messages: Vec<_> = buffer
            .entries_at_least(Level::TRACE)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn severity_filter_keeps_warnings_and_errors() {
        let buffer = LogBuffer::new(10);
        buffer.add_entry(entry(Level::DEBUG, "noise"));
        buffer.add_entry(entry(Level::WARN, "deletion failed"));
        buffer.add_entry(entry(Level::ERROR, "refresh failed"));
        buffer.add_entry(entry(Level::INFO, "listed"));

        let kept: Vec<_> = buffer
            .entries_at_least(Level::WARN)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(kept, vec!["deletion failed", "refresh failed"]);
        assert_eq!(buffer.entries_at_least(Level::TRACE).len(), 4);
    }

    #[test]
    fn display_includes_level_module_and_message() {
        let line = entry(Level::WARN, "boom").to_string();
        assert!(line.contains("WARN"));
        assert!(line.contains("runner: boom"));
    }
}
