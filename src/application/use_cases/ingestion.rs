// ============================================================
// INGESTION USE CASE
// ============================================================
// Pick a parser by file type and collect the pages it produces

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::diagnostics::DiagnosticsSink;
use crate::domain::error::{AppError, Result};
use crate::domain::page::Page;
use crate::domain::parser::Parser;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::logging::TracingSink;
use crate::infrastructure::text::TextParser;

const LOG_SOURCE: &str = "INGEST";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Csv,
    Text,
}

impl FileType {
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "csv" => Ok(FileType::Csv),
            "txt" | "md" => Ok(FileType::Text),
            other => Err(AppError::ValidationError(format!(
                "Unsupported file type: {}",
                other
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| AppError::ValidationError("Invalid file extension".to_string()))?;
        Self::from_extension(extension)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Csv => write!(f, "csv"),
            FileType::Text => write!(f, "text"),
        }
    }
}

/// Pages extracted from one input, ready for chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedDocument {
    pub file_name: String,
    pub file_type: FileType,
    pub pages: Vec<Page>,
}

impl IngestedDocument {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Length of all page texts joined with newlines
    pub fn total_chars(&self) -> usize {
        self.pages.last().map(|p| p.next_offset() - 1).unwrap_or(0)
    }
}

pub struct IngestionUseCase {
    sink: Arc<dyn DiagnosticsSink>,
}

impl Default for IngestionUseCase {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl IngestionUseCase {
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { sink }
    }

    fn parser_for(&self, file_type: FileType) -> Box<dyn Parser> {
        match file_type {
            FileType::Csv => Box::new(CsvParser::new(self.sink.clone())),
            FileType::Text => Box::new(TextParser::new()),
        }
    }

    /// Parse an in-memory document
    pub fn ingest_bytes(
        &self,
        file_name: &str,
        file_type: FileType,
        content: &[u8],
    ) -> Result<IngestedDocument> {
        let pages = self
            .parser_for(file_type)
            .parse(content)
            .map_err(|e| match e {
                AppError::DecodingError(msg) => {
                    AppError::DecodingError(format!("{}: {}", file_name, msg))
                }
                other => other,
            })?
            .collect::<Result<Vec<_>>>()?;

        Ok(IngestedDocument {
            file_name: file_name.to_string(),
            file_type,
            pages,
        })
    }

    /// Read a file from disk and parse it according to its extension
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestedDocument> {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::ValidationError("Invalid file name".to_string()))?
            .to_string();
        let file_type = FileType::from_path(path)?;

        self.sink.info(
            LOG_SOURCE,
            &format!("Parsing {} as {}", file_name, file_type),
        );

        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let document = self.ingest_bytes(&file_name, file_type, &content)?;

        self.sink.info(
            LOG_SOURCE,
            &format!(
                "Parsed {}: {} pages, {} chars",
                document.file_name,
                document.total_pages(),
                document.total_chars()
            ),
        );

        Ok(document)
    }

    /// Ingest each path in order; a failing input is reported and skipped
    pub async fn ingest_files(
        &self,
        paths: &[PathBuf],
    ) -> Vec<(PathBuf, Result<IngestedDocument>)> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            let result = self.ingest_file(path).await;
            if let Err(e) = &result {
                self.sink.error(
                    LOG_SOURCE,
                    &format!("Failed to ingest {}: {}", path.display(), e),
                );
            }
            results.push((path.clone(), result));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::LogBuffer;

    fn temp_file(extension: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "prepdocs-{}.{}",
            uuid::Uuid::new_v4(),
            extension
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("CSV").unwrap(), FileType::Csv);
        assert_eq!(FileType::from_extension("md").unwrap(), FileType::Text);
        assert!(matches!(
            FileType::from_extension("pdf"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_ingest_bytes_csv() {
        let use_case = IngestionUseCase::default();
        let document = use_case
            .ingest_bytes("rows.csv", FileType::Csv, b"A,B\n1,2\n3,4\n")
            .unwrap();

        assert_eq!(document.total_pages(), 2);
        assert_eq!(document.pages[1].text, "3,4");
        assert_eq!(document.total_chars(), "1,2\n3,4".len());
    }

    #[test]
    fn test_decoding_error_names_the_input() {
        let use_case = IngestionUseCase::default();
        let err = use_case
            .ingest_bytes("broken.csv", FileType::Csv, &[0x80])
            .unwrap_err();

        assert!(err.is_decoding());
        assert!(err.to_string().contains("broken.csv"));
    }

    #[tokio::test]
    async fn test_ingest_file_reads_from_disk() {
        let path = temp_file("csv", b"Content,Other\nhello,world\nfoo,bar\n");
        let use_case = IngestionUseCase::default();

        let document = use_case.ingest_file(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(document.file_type, FileType::Csv);
        assert_eq!(
            document.pages,
            vec![
                Page::new(0, 0, "hello".to_string()),
                Page::new(1, 6, "foo".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_ingest_file_missing() {
        let use_case = IngestionUseCase::default();
        let path = std::env::temp_dir().join(format!("prepdocs-{}.csv", uuid::Uuid::new_v4()));

        let err = use_case.ingest_file(&path).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ingest_files_continues_after_failure() {
        let logs = Arc::new(LogBuffer::new());
        let use_case = IngestionUseCase::new(logs.clone());

        let bad = temp_file("csv", &[0x43, 0x80, 0x0a]);
        let good = temp_file("txt", b"plain text");
        let results = use_case.ingest_files(&[bad.clone(), good.clone()]).await;
        std::fs::remove_file(&bad).unwrap();
        std::fs::remove_file(&good).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].1.as_ref().unwrap_err().is_decoding());

        let document = results[1].1.as_ref().unwrap();
        assert_eq!(document.file_type, FileType::Text);
        assert_eq!(document.pages[0].text, "plain text");

        let errors: Vec<_> = logs
            .entries()
            .into_iter()
            .filter(|entry| entry.level == "ERROR")
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains(&bad.display().to_string()));
    }
}
