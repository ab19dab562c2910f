//! Layout options and constants.
//!
//! All lengths are integer PDF points (1/72 inch).

use crate::error::{Error, Result};

/// Maximum wrapped lines on one page.
pub const DEFAULT_MAX_LINES_PER_PAGE: usize = 45;

/// Maximum characters on one wrapped line.
pub const DEFAULT_MAX_LINE_WIDTH: usize = 90;

/// Title size, first page only.
pub const TITLE_FONT_SIZE: u32 = 18;

/// Author line and running header size.
pub const HEADER_FONT_SIZE: u32 = 12;

/// Body text and footer size.
pub const BODY_FONT_SIZE: u32 = 11;

/// Distance between body baselines.
pub const BODY_LEADING: u32 = 14;

/// Page margin on all sides.
pub const DEFAULT_MARGIN: u32 = 50;

/// Baseline of the footer, measured from the bottom edge.
pub const FOOTER_BASELINE: u32 = 30;

/// Gap between the header block and the first body line.
const HEADER_GAP: u32 = 30;

/// Predefined page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// US Letter, 612 x 792
    #[default]
    Letter,
    /// ISO A4, 595 x 842
    A4,
    /// Custom width and height
    Custom(u32, u32),
}

impl PageSize {
    /// Get dimensions in points as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PageSize::Letter => (612, 792),
            PageSize::A4 => (595, 842),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// Options controlling pagination and page geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Maximum wrapped lines per page
    pub max_lines_per_page: usize,

    /// Maximum characters per wrapped line
    pub max_line_width: usize,

    /// Title font size (first page)
    pub title_font_size: u32,

    /// Author and running header font size
    pub header_font_size: u32,

    /// Body and footer font size
    pub body_font_size: u32,

    /// Distance between body baselines
    pub leading: u32,

    /// Page size
    pub page_size: PageSize,

    /// Margin on all sides
    pub margin: u32,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum lines per page.
    pub fn with_max_lines(mut self, lines: usize) -> Self {
        self.max_lines_per_page = lines;
        self
    }

    /// Set the maximum characters per line.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.max_line_width = width;
        self
    }

    /// Set the three font sizes (title, header, body).
    pub fn with_font_sizes(mut self, title: u32, header: u32, body: u32) -> Self {
        self.title_font_size = title;
        self.header_font_size = header;
        self.body_font_size = body;
        self
    }

    /// Set the body leading.
    pub fn with_leading(mut self, leading: u32) -> Self {
        self.leading = leading;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Baseline of the title (first page) or running header (later pages).
    pub(crate) fn header_baseline(&self, first_page: bool) -> i64 {
        let (_, height) = self.page_size.dimensions();
        let size = if first_page {
            self.title_font_size
        } else {
            self.header_font_size
        };
        i64::from(height) - i64::from(self.margin) - i64::from(size)
    }

    /// Vertical offset from the title baseline to the author baseline.
    pub(crate) fn author_offset(&self) -> i64 {
        i64::from(self.header_font_size * 2)
    }

    /// Vertical offset from the last header baseline to the first body line.
    pub(crate) fn body_offset(&self) -> i64 {
        i64::from(HEADER_GAP)
    }

    /// Baseline of the first body line.
    pub(crate) fn body_top(&self, first_page: bool) -> i64 {
        let mut y = self.header_baseline(first_page) - self.body_offset();
        if first_page {
            y -= self.author_offset();
        }
        y
    }

    /// Check that a full page of body lines clears the footer.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_size.dimensions();

        if self.max_lines_per_page == 0 || self.max_line_width == 0 {
            return Err(Error::InvalidLayout(
                "line limits must be positive".to_string(),
            ));
        }
        if self.title_font_size == 0 || self.header_font_size == 0 || self.body_font_size == 0 {
            return Err(Error::InvalidLayout("font sizes must be positive".to_string()));
        }
        if self.margin.saturating_mul(2) >= width.min(height) {
            return Err(Error::InvalidLayout(format!(
                "margin {} leaves no room on a {}x{} page",
                self.margin, width, height
            )));
        }

        let last_line = self.body_top(true)
            - (self.max_lines_per_page as i64 - 1) * i64::from(self.leading);
        let floor = i64::from(FOOTER_BASELINE + self.body_font_size);
        if last_line < floor {
            return Err(Error::InvalidLayout(format!(
                "{} lines with leading {} overrun the footer (last baseline {}, minimum {})",
                self.max_lines_per_page, self.leading, last_line, floor
            )));
        }

        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_lines_per_page: DEFAULT_MAX_LINES_PER_PAGE,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            title_font_size: TITLE_FONT_SIZE,
            header_font_size: HEADER_FONT_SIZE,
            body_font_size: BODY_FONT_SIZE,
            leading: BODY_LEADING,
            page_size: PageSize::Letter,
            margin: DEFAULT_MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = LayoutOptions::default();
        assert_eq!(options.max_lines_per_page, DEFAULT_MAX_LINES_PER_PAGE);
        assert_eq!(options.max_line_width, DEFAULT_MAX_LINE_WIDTH);
        assert!(options.validate().is_ok());
        assert!(options.clone().with_page_size(PageSize::A4).validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = LayoutOptions::new()
            .with_max_lines(10)
            .with_line_width(40)
            .with_font_sizes(20, 14, 10)
            .with_page_size(PageSize::A4);

        assert_eq!(options.max_lines_per_page, 10);
        assert_eq!(options.max_line_width, 40);
        assert_eq!(options.title_font_size, 20);
        assert_eq!(options.page_size.dimensions(), (595, 842));
    }

    #[test]
    fn test_geometry() {
        let options = LayoutOptions::default();
        // 792 - 50 - 18
        assert_eq!(options.header_baseline(true), 724);
        // 792 - 50 - 12
        assert_eq!(options.header_baseline(false), 730);
        assert_eq!(options.body_top(true), 724 - 24 - 30);
        assert_eq!(options.body_top(false), 730 - 30);
    }

    #[test]
    fn test_too_many_lines_rejected() {
        let options = LayoutOptions::new().with_max_lines(200);
        assert!(matches!(options.validate(), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let options = LayoutOptions::new().with_line_width(0);
        assert!(matches!(options.validate(), Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_margin_rejected() {
        let options = LayoutOptions::new().with_margin(400);
        assert!(matches!(options.validate(), Err(Error::InvalidLayout(_))));
    }
}
