// ============================================================
// PAGE
// ============================================================
// Unit of extracted text handed to the chunking stage

use serde::{Deserialize, Serialize};

/// One unit of extracted text.
///
/// `offset` is the number of characters that precede this page when all pages
/// of a document are joined with a single newline, so page `i` starts at
/// `sum(len(page_j.text) + 1)` for every `j < i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based position of the page within its document
    pub index: usize,

    /// Character offset of the page within the joined document text
    pub offset: usize,

    /// Extracted text
    pub text: String,
}

impl Page {
    pub fn new(index: usize, offset: usize, text: String) -> Self {
        Self {
            index,
            offset,
            text,
        }
    }

    /// Character count of the text, as used for offset bookkeeping.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Offset at which the following page starts.
    pub fn next_offset(&self) -> usize {
        self.offset + self.char_len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_offset_counts_chars_not_bytes() {
        let page = Page::new(0, 3, "héllo".to_string());
        assert_eq!(page.char_len(), 5);
        assert_eq!(page.next_offset(), 9);
    }
}
