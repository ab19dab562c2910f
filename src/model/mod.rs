//! Data model for document synthesis.
//!
//! A [`DocumentRequest`] is the immutable input of the pipeline, a [`Page`]
//! is the unit the paginator produces, and a [`Document`] is the paginated
//! result handed to the PDF builder.

mod document;
mod page;
mod request;

pub use document::Document;
pub use page::Page;
pub use request::{DocumentRequest, DEFAULT_AUTHOR};
