use super::error::Result;
use super::page::Page;

/// Lazily produced pages of a single document.
///
/// The iterator is finite and cannot be restarted. Dropping it early is safe.
pub type Pages<'a> = Box<dyn Iterator<Item = Result<Page>> + 'a>;

/// Converts the raw bytes of one document into pages.
///
/// Implementations decode eagerly, so undecodable input is reported by
/// `parse` itself and never surfaces halfway through iteration.
pub trait Parser: Send + Sync {
    fn parse<'a>(&self, content: &'a [u8]) -> Result<Pages<'a>>;
}
