//! Page-level types.

use serde::{Deserialize, Serialize};

/// One output page: the wrapped body lines that belong to it.
///
/// Pages are created by the paginator and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Wrapped lines; a blank entry is a paragraph gap
    pub lines: Vec<String>,
}

impl Page {
    /// Create a page from its lines.
    pub fn new(number: u32, lines: Vec<String>) -> Self {
        Self { number, lines }
    }

    /// Create an empty page.
    pub fn blank(number: u32) -> Self {
        Self::new(number, Vec::new())
    }

    /// Check if the page holds no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the number of lines on the page, blank lines included.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over the words on the page in reading order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|line| line.split_whitespace())
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.lines.join("\n")
    }
}
