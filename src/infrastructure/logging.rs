// ============================================================
// DIAGNOSTICS SINKS
// ============================================================
// Tracing-backed sink for the binary, in-memory buffer for embedders and tests

use std::sync::Mutex;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::diagnostics::{DiagnosticsSink, LogLevel};

const MAX_LOG_ENTRIES: usize = 100;

/// Forwards diagnostics to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, level: LogLevel, source: &str, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(source, "{}", message),
            LogLevel::Warn => tracing::warn!(source, "{}", message),
            LogLevel::Error => tracing::error!(source, "{}", message),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Keeps the most recent diagnostics in memory.
#[derive(Debug, Default)]
pub struct LogBuffer {
    entries: Mutex<Vec<LogEntry>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log_entry(&self, level: &str, source: &str, message: &str) -> LogEntry {
        let entry = LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: level.to_string(),
            source: source.to_string(),
            message: message.to_string(),
        };
        // A poisoned lock still holds a usable log vector.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(entry.clone());
        if entries.len() > MAX_LOG_ENTRIES {
            entries.remove(0);
        }
        entry
    }

    /// Snapshot of the buffered entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl DiagnosticsSink for LogBuffer {
    fn emit(&self, level: LogLevel, source: &str, message: &str) {
        self.add_log_entry(level.as_str(), source, message);
    }
}
