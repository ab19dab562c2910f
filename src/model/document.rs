//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A paginated document, ready to be written as PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title
    pub title: String,

    /// Author line
    pub author: String,

    /// Pages in reading order; never empty once paginated
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from its pages.
    pub fn new(title: impl Into<String>, author: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Total wrapped lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Page::line_count).sum()
    }

    /// Iterate over every body word in reading order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::words)
    }

    /// Get plain text content of all pages.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(Page::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
