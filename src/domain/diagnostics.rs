use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives informational notices raised while parsing and ingesting.
///
/// Parsers never write to a global logger directly; they report through the
/// sink they were built with.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, level: LogLevel, source: &str, message: &str);

    fn info(&self, source: &str, message: &str) {
        self.emit(LogLevel::Info, source, message);
    }

    fn warn(&self, source: &str, message: &str) {
        self.emit(LogLevel::Warn, source, message);
    }

    fn error(&self, source: &str, message: &str) {
        self.emit(LogLevel::Error, source, message);
    }
}
