//! Document request types.

use serde::{Deserialize, Serialize};

/// Author printed when a request does not name one.
pub const DEFAULT_AUTHOR: &str = "Templo do Abismo";

/// A request to synthesize one PDF document.
///
/// Requests are usually built by a caller that loaded a stored grimoire
/// (title, HTML body, author) from external storage. They can also be read
/// from JSON:
///
/// ```
/// use grimoire_pdf::DocumentRequest;
///
/// let request: DocumentRequest =
///     serde_json::from_str(r#"{"title": "Liber", "content": "<p>Texto</p>"}"#).unwrap();
/// assert_eq!(request.author(), "Templo do Abismo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Document title, printed on the first page and in running headers
    pub title: String,

    /// HTML body
    #[serde(default)]
    pub content: String,

    /// Author line; `None` falls back to [`DEFAULT_AUTHOR`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl DocumentRequest {
    /// Create a request with the default author.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: None,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Author to print, falling back to the organization name.
    ///
    /// A blank author counts as missing.
    pub fn author(&self) -> &str {
        match self.author.as_deref() {
            Some(author) if !author.trim().is_empty() => author,
            _ => DEFAULT_AUTHOR,
        }
    }

    /// File name for the generated PDF, derived from the title.
    ///
    /// ```
    /// use grimoire_pdf::DocumentRequest;
    ///
    /// let request = DocumentRequest::new("O Livro das Sombras!", "");
    /// assert_eq!(request.suggested_filename(), "o-livro-das-sombras.pdf");
    /// ```
    pub fn suggested_filename(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for c in self.title.chars().flat_map(char::to_lowercase) {
            if c.is_alphanumeric() {
                slug.push(c);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');

        if slug.is_empty() {
            "document.pdf".to_string()
        } else {
            format!("{}.pdf", slug)
        }
    }

    /// Read a request from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
