//! Plain text preview of a paginated document.

use crate::model::Document;
use crate::pdf::footer_text;

/// Render every page as plain text, each followed by its footer line.
pub fn to_text(doc: &Document) -> String {
    let total = doc.pages.len();
    let mut output = String::new();

    output.push_str(&doc.title);
    output.push('\n');
    output.push_str(&doc.author);
    output.push('\n');

    for (index, page) in doc.pages.iter().enumerate() {
        output.push('\n');
        for line in &page.lines {
            output.push_str(line);
            output.push('\n');
        }
        output.push_str(&format!("-- {} --\n", footer_text(index + 1, total)));
    }

    output
}
