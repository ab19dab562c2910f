//! Hand-rolled PDF writer.
//!
//! [`build`] turns pages into an [`ObjectGraph`]; [`serialize`] writes the
//! graph with an exact xref table. No PDF library is involved.

mod builder;
mod content;
mod encoding;
mod object;
mod options;
mod writer;

pub use builder::{build, footer_text, page_content, FONT_ENCODING, FONT_NAME};
pub use content::{escape_text, ContentBuilder, FONT_RESOURCE};
pub use encoding::{encode_win_ansi, win_ansi_byte, REPLACEMENT_BYTE};
pub use object::{ObjectGraph, ObjectId, PdfObject};
pub use options::{
    LayoutOptions, PageSize, BODY_FONT_SIZE, BODY_LEADING, DEFAULT_MARGIN,
    DEFAULT_MAX_LINES_PER_PAGE, DEFAULT_MAX_LINE_WIDTH, FOOTER_BASELINE, HEADER_FONT_SIZE,
    TITLE_FONT_SIZE,
};
pub use writer::{serialize, PdfBytes, PDF_EOF, PDF_HEADER};
