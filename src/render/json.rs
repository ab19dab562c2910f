//! JSON preview of a paginated document.

use crate::error::{Error, Result};
use crate::model::Document;

/// Layout of the preview JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one page line per row; for reading
    #[default]
    Pretty,
    /// Single line; for piping into other tools
    Compact,
}

/// Serialize the page split of a document: title, author and every page's
/// wrapped lines, exactly as they will be drawn.
///
/// # Example
///
/// ```
/// use grimoire_pdf::render::to_json;
/// use grimoire_pdf::{DocumentRequest, JsonFormat, Synthesizer};
///
/// let doc = Synthesizer::new().paginate(&DocumentRequest::new("Liber", "<p>Texto</p>"));
/// let json = to_json(&doc, JsonFormat::Compact).unwrap();
/// assert!(json.contains(r#""lines":["Texto"]"#));
/// ```
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    json.map_err(|e| Error::Render(format!("cannot serialize page preview: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn two_pages() -> Document {
        Document::new(
            "Liber",
            "Soror A.",
            vec![
                Page::new(1, vec!["um dois".to_string(), String::new()]),
                Page::new(2, vec!["três".to_string()]),
            ],
        )
    }

    #[test]
    fn test_preview_lists_every_page() {
        let json = to_json(&two_pages(), JsonFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Liber");
        assert_eq!(value["author"], "Soror A.");
        assert_eq!(value["pages"].as_array().unwrap().len(), 2);
        assert_eq!(value["pages"][0]["lines"][1], "");
        assert_eq!(value["pages"][1]["number"], 2);
    }

    #[test]
    fn test_compact_is_single_line() {
        let doc = Document::new("Vazio", "Soror A.", vec![Page::blank(1)]);

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""lines":[]"#));
    }

    #[test]
    fn test_preview_round_trips_to_document() {
        let doc = two_pages();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
