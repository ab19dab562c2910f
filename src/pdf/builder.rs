//! Object graph construction.

use crate::error::Result;
use crate::model::Page;

use super::content::ContentBuilder;
use super::object::{ObjectGraph, ObjectId, PdfObject};
use super::options::{LayoutOptions, FOOTER_BASELINE};

/// Standard font shared by every page.
pub const FONT_NAME: &str = "Helvetica";

/// Encoding declared for the shared font; matches the stream bytes.
pub const FONT_ENCODING: &str = "WinAnsiEncoding";

/// Build the object graph for a paginated document.
///
/// An empty `pages` slice is treated as one blank page so the result is
/// always a valid document.
pub fn build(
    title: &str,
    author: &str,
    pages: &[Page],
    layout: &LayoutOptions,
) -> Result<ObjectGraph> {
    let blank = [Page::blank(1)];
    let pages = if pages.is_empty() { &blank[..] } else { pages };
    let total = pages.len();
    let font = ObjectId::font(total);

    let mut graph = ObjectGraph::new();
    graph.insert(
        ObjectId::CATALOG,
        PdfObject::Catalog {
            pages: ObjectId::PAGE_TREE,
        },
    )?;
    graph.insert(
        ObjectId::PAGE_TREE,
        PdfObject::PageTree {
            kids: (0..total).map(ObjectId::page).collect(),
        },
    )?;

    for (index, page) in pages.iter().enumerate() {
        graph.insert(
            ObjectId::page(index),
            PdfObject::Page {
                parent: ObjectId::PAGE_TREE,
                contents: ObjectId::content(index),
                font,
                media_box: layout.page_size.dimensions(),
            },
        )?;

        let data = page_content(title, author, page, index + 1, total, layout);
        log::trace!("Page {}: {} content bytes", index + 1, data.len());
        graph.insert(ObjectId::content(index), PdfObject::ContentStream { data })?;
    }

    graph.insert(
        font,
        PdfObject::Font {
            base_font: FONT_NAME,
            encoding: FONT_ENCODING,
        },
    )?;

    log::debug!("Built {} objects for {} pages", graph.len(), total);
    Ok(graph)
}

/// Footer line of page `number` (1-indexed) out of `total`.
pub fn footer_text(number: usize, total: usize) -> String {
    format!("Page {} of {}", number, total)
}

/// Drawing operators for one page.
///
/// The first page opens with the title and author; later pages carry the
/// title as a running header. Every page ends with a centered footer.
pub fn page_content(
    title: &str,
    author: &str,
    page: &Page,
    number: usize,
    total: usize,
    layout: &LayoutOptions,
) -> Vec<u8> {
    let first_page = number == 1;
    let left = i64::from(layout.margin);
    let mut content = ContentBuilder::new();

    content.begin_text();
    if first_page {
        content
            .set_font(layout.title_font_size)
            .move_to(left, layout.header_baseline(true))
            .show(title)
            .set_font(layout.header_font_size)
            .move_to(0, -layout.author_offset())
            .show(author);
    } else {
        content
            .set_font(layout.header_font_size)
            .move_to(left, layout.header_baseline(false))
            .show(title);
    }

    content
        .set_font(layout.body_font_size)
        .set_leading(layout.leading)
        .move_to(0, -layout.body_offset());
    for line in &page.lines {
        content.show_line(line);
    }
    content.end_text();

    let footer = footer_text(number, total);
    content
        .begin_text()
        .set_font(layout.body_font_size)
        .move_to(footer_x(&footer, layout), i64::from(FOOTER_BASELINE))
        .show(&footer)
        .end_text();

    content.finish()
}

/// Left edge that roughly centers `text`, assuming an average glyph width
/// of half the font size.
fn footer_x(text: &str, layout: &LayoutOptions) -> i64 {
    let (width, _) = layout.page_size.dimensions();
    let text_width = text.chars().count() as i64 * i64::from(layout.body_font_size) / 2;
    ((i64::from(width) - text_width) / 2).max(i64::from(layout.margin))
}
