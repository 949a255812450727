// ============================================================
// CSV PARSER
// ============================================================
// Turn CSV rows into pages, preferring a dedicated "Content" column

use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::diagnostics::DiagnosticsSink;
use crate::domain::error::Result;
use crate::domain::page::Page;
use crate::domain::parser::{Pages, Parser};
use crate::infrastructure::logging::TracingSink;

const LOG_SOURCE: &str = "CSV";
const CONTENT_HEADER: &str = "content";
const UTF8_BOM: char = '\u{feff}';

/// CSV parser where each data row becomes one page.
///
/// When the header row names a `Content` column (case-insensitive, surrounding
/// whitespace ignored) only that cell is used as page text. Otherwise, and for
/// any row too short to have that cell, the row's cells are joined with commas.
pub struct CsvParser {
    sink: Arc<dyn DiagnosticsSink>,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl CsvParser {
    /// Create a parser reporting through `sink`
    pub fn new(sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { sink }
    }

    /// Decode `content`, read the header row and return the page iterator.
    ///
    /// Fails only when `content` is not valid UTF-8.
    pub fn pages<'a>(&self, content: &'a [u8]) -> Result<CsvPages<'a>> {
        let text = std::str::from_utf8(content)?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut lines = LogicalLines::new(text);

        // A blank first line is still the header row
        let headers = match lines.next() {
            Some(line) => parse_line(line)?,
            None => StringRecord::new(),
        };

        let content_column = find_content_column(&headers);
        match content_column {
            Some(index) => self.sink.info(
                LOG_SOURCE,
                &format!(
                    "Found 'Content' column at index {}, using only this column for embeddings",
                    index
                ),
            ),
            None => self.sink.warn(
                LOG_SOURCE,
                "No 'Content' column found in CSV, using all columns for embeddings",
            ),
        }

        Ok(CsvPages {
            lines,
            content_column,
            index: 0,
            offset: 0,
        })
    }
}

impl Parser for CsvParser {
    fn parse<'a>(&self, content: &'a [u8]) -> Result<Pages<'a>> {
        Ok(Box::new(self.pages(content)?))
    }
}

/// Position of the first header cell equal to "content", ignoring case and
/// surrounding whitespace.
fn find_content_column(headers: &StringRecord) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().to_lowercase() == CONTENT_HEADER)
}

/// Parse one logical line as a single CSV row. An empty line is an empty row.
fn parse_line(line: &str) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Logical lines of a document. `\r\n` counts as one break and a trailing
/// break does not start an extra empty line.
struct LogicalLines<'a> {
    rest: &'a str,
}

impl<'a> LogicalLines<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((start, c)) => {
                let line = &self.rest[..start];
                let mut end = start + c.len_utf8();
                if c == '\r' && self.rest[end..].starts_with('\n') {
                    end += 1;
                }
                self.rest = &self.rest[end..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Page text for one data row.
fn row_text(record: &StringRecord, content_column: Option<usize>) -> String {
    match content_column.and_then(|index| record.get(index)) {
        Some(cell) => cell.to_string(),
        None => record.iter().collect::<Vec<_>>().join(","),
    }
}

/// Lazy page sequence over the data rows of one CSV document.
pub struct CsvPages<'a> {
    lines: LogicalLines<'a>,
    content_column: Option<usize>,
    index: usize,
    offset: usize,
}

impl CsvPages<'_> {
    /// Column used for page text, if the header declared one
    pub fn content_column(&self) -> Option<usize> {
        self.content_column
    }
}

impl Iterator for CsvPages<'_> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match parse_line(self.lines.next()?) {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };

        let page = Page::new(self.index, self.offset, row_text(&record, self.content_column));
        self.index += 1;
        self.offset = page.next_offset();

        Some(Ok(page))
    }
}
