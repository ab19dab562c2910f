//! Error types for grimoire-pdf library.

use std::io;
use thiserror::Error;

/// Result type alias for grimoire-pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while synthesizing or inspecting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A document request could not be decoded from JSON.
    #[error("Invalid document request: {0}")]
    Json(#[from] serde_json::Error),

    /// Layout options that cannot produce a page.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// The emitted buffer disagrees with its own xref table or stream lengths.
    ///
    /// This is a defect in the writer, never an input problem.
    #[error("Build invariant violated: {0}")]
    BuildInvariant(String),

    /// Bytes handed to the verifier are not a well-formed PDF.
    #[error("Malformed PDF: {0}")]
    Malformed(String),

    /// Error during preview rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
