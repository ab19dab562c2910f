//! PDF object graph.
//!
//! Identifiers are fixed by the page count: `1` is the catalog, `2` the
//! page tree, page `i` (0-indexed) owns `3 + 2i` (page) and `4 + 2i`
//! (content stream), and the shared font comes last at `3 + 2n`.

use std::fmt;

use crate::error::{Error, Result};

/// Number of a PDF indirect object. Generation is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    /// The document catalog.
    pub const CATALOG: ObjectId = ObjectId(1);

    /// The root of the page tree.
    pub const PAGE_TREE: ObjectId = ObjectId(2);

    /// Page object of the page at `index` (0-indexed).
    pub fn page(index: usize) -> Self {
        ObjectId(3 + 2 * index as u32)
    }

    /// Content stream of the page at `index` (0-indexed).
    pub fn content(index: usize) -> Self {
        ObjectId(4 + 2 * index as u32)
    }

    /// Shared font object of a document with `page_count` pages.
    pub fn font(page_count: usize) -> Self {
        ObjectId(3 + 2 * page_count as u32)
    }

    /// Object number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// Indirect reference syntax, e.g. `3 0 R`.
    pub fn reference(self) -> String {
        format!("{} 0 R", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the output object graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfObject {
    /// Document catalog
    Catalog {
        /// Page tree root
        pages: ObjectId,
    },

    /// Page tree root
    PageTree {
        /// Page objects in reading order
        kids: Vec<ObjectId>,
    },

    /// A single page
    Page {
        /// Page tree root
        parent: ObjectId,
        /// Content stream of this page
        contents: ObjectId,
        /// Shared font
        font: ObjectId,
        /// Width and height in points
        media_box: (u32, u32),
    },

    /// Drawing operators of one page, already encoded
    ContentStream {
        /// Stream body
        data: Vec<u8>,
    },

    /// A standard Type1 font
    Font {
        /// PostScript name, e.g. `Helvetica`
        base_font: &'static str,
        /// Named encoding, e.g. `WinAnsiEncoding`
        encoding: &'static str,
    },
}

impl PdfObject {
    /// Short name of the variant, for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            PdfObject::Catalog { .. } => "catalog",
            PdfObject::PageTree { .. } => "pages",
            PdfObject::Page { .. } => "page",
            PdfObject::ContentStream { .. } => "content",
            PdfObject::Font { .. } => "font",
        }
    }

    /// Append the object body (the part between `N 0 obj\n` and
    /// `\nendobj`) to `out`.
    pub fn write_body(&self, out: &mut Vec<u8>) {
        match self {
            PdfObject::Catalog { pages } => {
                out.extend_from_slice(
                    format!("<< /Type /Catalog /Pages {} >>", pages.reference()).as_bytes(),
                );
            }
            PdfObject::PageTree { kids } => {
                let refs: Vec<String> = kids.iter().map(|id| id.reference()).collect();
                out.extend_from_slice(
                    format!(
                        "<< /Type /Pages /Kids [{}] /Count {} >>",
                        refs.join(" "),
                        kids.len()
                    )
                    .as_bytes(),
                );
            }
            PdfObject::Page {
                parent,
                contents,
                font,
                media_box,
            } => {
                out.extend_from_slice(
                    format!(
                        concat!(
                            "<< /Type /Page /Parent {} /MediaBox [0 0 {} {}] /Contents {} ",
                            "/Resources << /Font << /{} {} >> >> >>"
                        ),
                        parent.reference(),
                        media_box.0,
                        media_box.1,
                        contents.reference(),
                        super::content::FONT_RESOURCE,
                        font.reference()
                    )
                    .as_bytes(),
                );
            }
            PdfObject::ContentStream { data } => {
                out.extend_from_slice(format!("<< /Length {} >>\nstream\n", data.len()).as_bytes());
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
            PdfObject::Font {
                base_font,
                encoding,
            } => {
                out.extend_from_slice(
                    format!(
                        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /{} >>",
                        base_font, encoding
                    )
                    .as_bytes(),
                );
            }
        }
    }
}

/// Objects in ascending identifier order, starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectGraph {
    objects: Vec<PdfObject>,
}

impl ObjectGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the next inserted object will receive.
    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.objects.len() as u32 + 1)
    }

    /// Insert an object under the identifier it was allocated.
    ///
    /// Objects must arrive in identifier order; anything else means the
    /// references already written into other objects would be wrong.
    pub fn insert(&mut self, id: ObjectId, object: PdfObject) -> Result<()> {
        let expected = self.next_id();
        if id != expected {
            return Err(Error::BuildInvariant(format!(
                "{} object allocated as {} but inserted at {}",
                object.kind(),
                id,
                expected
            )));
        }
        self.objects.push(object);
        Ok(())
    }

    /// Look up an object.
    pub fn get(&self, id: ObjectId) -> Option<&PdfObject> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.objects.get(index))
    }

    /// Number of objects (the free entry 0 not included).
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the graph holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over `(id, object)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &PdfObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i as u32 + 1), object))
    }

    /// Page objects listed by the page tree.
    pub fn kids(&self) -> &[ObjectId] {
        match self.get(ObjectId::PAGE_TREE) {
            Some(PdfObject::PageTree { kids }) => kids,
            _ => &[],
        }
    }

    /// Number of pages listed by the page tree.
    pub fn page_count(&self) -> usize {
        self.kids().len()
    }
}
