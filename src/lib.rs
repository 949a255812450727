pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{FileType, IngestedDocument, IngestionUseCase};
pub use domain::diagnostics::{DiagnosticsSink, LogLevel};
pub use domain::error::{AppError, Result};
pub use domain::page::Page;
pub use domain::parser::{Pages, Parser};
pub use infrastructure::config::AppConfig;
pub use infrastructure::csv::{CsvPages, CsvParser};
pub use infrastructure::logging::{LogBuffer, LogEntry, TracingSink};
pub use infrastructure::text::TextParser;
