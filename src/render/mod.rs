//! Preview rendering of paginated documents.
//!
//! These renderers show how a document will be split into pages without
//! producing a PDF, which is what the reading view and the CLI `preview`
//! command need.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
