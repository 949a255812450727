// ============================================================
// TEXT PARSER
// ============================================================
// Plain text and markdown files become a single page

use crate::domain::error::Result;
use crate::domain::page::Page;
use crate::domain::parser::{Pages, Parser};

#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl TextParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for TextParser {
    fn parse<'a>(&self, content: &'a [u8]) -> Result<Pages<'a>> {
        let text = std::str::from_utf8(content)?;

        // Empty files produce no page rather than an empty one
        let page: Option<Result<Page>> =
            (!text.is_empty()).then(|| Ok(Page::new(0, 0, text.to_string())));

        Ok(Box::new(page.into_iter()))
    }
}
