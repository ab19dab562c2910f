//! # grimoire-pdf
//!
//! Minimal PDF synthesis for long-form HTML documents.
//!
//! This library turns a title, an author and an HTML body into a small,
//! self-contained PDF 1.4 file. The PDF is written by hand: no PDF library
//! is involved, and every xref offset and stream `/Length` is measured from
//! the buffer actually emitted.
//!
//! ## Quick Start
//!
//! ```
//! use grimoire_pdf::{synthesize, DocumentRequest};
//!
//! fn main() -> grimoire_pdf::Result<()> {
//!     let request = DocumentRequest::new("Liber Umbrarum", "<h1>I</h1><p>In principio...</p>")
//!         .with_author("Frater V.");
//!
//!     let pdf = synthesize(&request)?;
//!     assert!(pdf.as_bytes().starts_with(b"%PDF-1.4"));
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Normalize**: markup to paragraph-separated text ([`normalize`])
//! - **Paginate**: greedy word wrap and fixed-height pages ([`paginate`])
//! - **Build**: catalog, page tree, content streams and font ([`pdf::build`])
//! - **Serialize**: single-byte output with an exact xref table ([`pdf::serialize`])
//! - **Verify**: the buffer is re-read before it is returned ([`verify()`])

pub mod error;
pub mod model;
pub mod normalize;
pub mod paginate;
pub mod pdf;
pub mod render;
pub mod verify;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Document, DocumentRequest, Page, DEFAULT_AUTHOR};
pub use normalize::{normalize, NormalizeOptions, Normalizer};
pub use paginate::{paginate, wrap_line};
pub use pdf::{
    LayoutOptions, PageSize, PdfBytes, BODY_FONT_SIZE, DEFAULT_MAX_LINES_PER_PAGE,
    DEFAULT_MAX_LINE_WIDTH, HEADER_FONT_SIZE, TITLE_FONT_SIZE,
};
pub use render::JsonFormat;
pub use verify::{verify, VerifyReport};

/// Synthesize a PDF with the default layout.
///
/// # Example
///
/// ```
/// use grimoire_pdf::{synthesize, DocumentRequest};
///
/// let pdf = synthesize(&DocumentRequest::new("Vazio", "")).unwrap();
/// assert_eq!(pdf.page_count(), 1);
/// ```
pub fn synthesize(request: &DocumentRequest) -> Result<PdfBytes> {
    Synthesizer::new().synthesize(request)
}

/// Synthesize a PDF with a custom layout.
///
/// # Example
///
/// ```
/// use grimoire_pdf::{synthesize_with_options, DocumentRequest, LayoutOptions, PageSize};
///
/// let layout = LayoutOptions::new().with_page_size(PageSize::A4).with_line_width(60);
/// let request = DocumentRequest::new("Liber", "<p>Texto</p>");
/// let pdf = synthesize_with_options(&request, &layout).unwrap();
/// assert!(!pdf.is_empty());
/// ```
pub fn synthesize_with_options(
    request: &DocumentRequest,
    layout: &LayoutOptions,
) -> Result<PdfBytes> {
    Synthesizer::new().with_layout(layout.clone()).synthesize(request)
}

/// Write an already paginated document.
///
/// The emitted buffer is verified before it is returned; a mismatch between
/// the buffer and its own xref table or stream lengths is reported as
/// [`Error::BuildInvariant`] and no bytes are returned.
pub fn write_document(doc: &Document, layout: &LayoutOptions) -> Result<PdfBytes> {
    let graph = pdf::build(&doc.title, &doc.author, &doc.pages, layout)?;
    let bytes = pdf::serialize(&graph)?;

    let report = verify(bytes.as_bytes()).map_err(|e| match e {
        Error::Malformed(msg) => Error::BuildInvariant(msg),
        other => other,
    })?;

    if report.page_count != graph.page_count() || report.object_count != graph.len() {
        return Err(Error::BuildInvariant(format!(
            "wrote {} objects and {} pages but the file lists {} and {}",
            graph.len(),
            graph.page_count(),
            report.object_count,
            report.page_count
        )));
    }

    Ok(bytes)
}

/// Builder for synthesizing documents.
///
/// # Example
///
/// ```
/// use grimoire_pdf::{DocumentRequest, PageSize, Synthesizer};
///
/// let request = DocumentRequest::new("Liber", "<p>Texto</p>");
/// let synthesizer = Synthesizer::new()
///     .with_max_lines(30)
///     .with_line_width(70)
///     .with_page_size(PageSize::A4);
///
/// let preview = synthesizer.paginate(&request);
/// assert_eq!(preview.page_count(), 1);
///
/// let pdf = synthesizer.synthesize(&request)?;
/// assert_eq!(pdf.page_count(), 1);
/// # Ok::<(), grimoire_pdf::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    normalize_options: NormalizeOptions,
    layout: LayoutOptions,
}

impl Synthesizer {
    /// Create a new synthesizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize_options = options;
        self
    }

    /// Set the maximum lines per page.
    pub fn with_max_lines(mut self, lines: usize) -> Self {
        self.layout = self.layout.with_max_lines(lines);
        self
    }

    /// Set the maximum characters per line.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.layout = self.layout.with_line_width(width);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.layout = self.layout.with_page_size(size);
        self
    }

    /// Current layout options.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Normalize and paginate a request without writing a PDF.
    ///
    /// The title and author get the same Unicode cleanup as the body.
    pub fn paginate(&self, request: &DocumentRequest) -> Document {
        let normalizer = Normalizer::new(self.normalize_options.clone());
        let text = normalizer.normalize(&request.content);
        let pages = paginate(
            &text,
            self.layout.max_lines_per_page,
            self.layout.max_line_width,
        );
        Document::new(
            normalizer.clean_text(&request.title),
            normalizer.clean_text(request.author()),
            pages,
        )
    }

    /// Normalize, paginate and write a request.
    pub fn synthesize(&self, request: &DocumentRequest) -> Result<PdfBytes> {
        self.layout.validate()?;
        let doc = self.paginate(request);
        log::debug!(
            "Synthesizing {:?}: {} pages, {} lines",
            doc.title,
            doc.page_count(),
            doc.line_count()
        );
        write_document(&doc, &self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_builder() {
        let synthesizer = Synthesizer::new()
            .with_max_lines(20)
            .with_line_width(50)
            .with_page_size(PageSize::A4);

        assert_eq!(synthesizer.layout().max_lines_per_page, 20);
        assert_eq!(synthesizer.layout().max_line_width, 50);
        assert_eq!(synthesizer.layout().page_size, PageSize::A4);
    }

    #[test]
    fn test_synthesizer_default() {
        let synthesizer = Synthesizer::default();
        assert_eq!(synthesizer.layout(), &LayoutOptions::default());
    }

    #[test]
    fn test_paginate_uses_default_author() {
        let doc = Synthesizer::new().paginate(&DocumentRequest::new("T", "<p>x</p>"));
        assert_eq!(doc.author, DEFAULT_AUTHOR);
        assert_eq!(doc.pages[0].lines, vec!["x"]);
    }

    #[test]
    fn test_paginate_composes_title_and_author() {
        let request = DocumentRequest::new("Grimo\u{0301}rio", "").with_author("Jose\u{0301}");
        let doc = Synthesizer::new().paginate(&request);
        assert_eq!(doc.title, "Grim\u{00F3}rio");
        assert_eq!(doc.author, "Jos\u{00E9}");

        let raw = Synthesizer::new()
            .with_normalize_options(NormalizeOptions::minimal())
            .paginate(&request);
        assert_eq!(raw.title, "Grimo\u{0301}rio");
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let result = Synthesizer::new()
            .with_max_lines(500)
            .synthesize(&DocumentRequest::new("T", "x"));
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_synthesize_empty_content() {
        let pdf = synthesize(&DocumentRequest::new("Vazio", "")).unwrap();
        assert_eq!(pdf.page_count(), 1);
        assert!(pdf.as_bytes().ends_with(b"%%EOF"));
    }

    #[test]
    fn test_write_document_zero_pages() {
        let doc = Document::new("T", "A", Vec::new());
        let pdf = write_document(&doc, &LayoutOptions::default()).unwrap();
        assert_eq!(pdf.page_count(), 1);
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(PdfBytes::MIME_TYPE, "application/pdf");
    }
}
