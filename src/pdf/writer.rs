//! Byte emitter: header, objects, xref table and trailer.

use std::path::Path;

use crate::error::{Error, Result};

use super::object::{ObjectGraph, ObjectId};

/// File header written before the first object.
pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n";

/// End-of-file marker; nothing follows it.
pub const PDF_EOF: &[u8] = b"%%EOF";

/// A finished PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfBytes {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
    page_count: usize,
}

impl PdfBytes {
    /// MIME type for HTTP responses.
    pub const MIME_TYPE: &'static str = "application/pdf";

    /// Raw file contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the file contents.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// File size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a serialized document; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte offset of each object, object 1 first.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of pages in the file.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Write the file to disk.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

impl AsRef<[u8]> for PdfBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Serialize an object graph.
///
/// Offsets are taken from the buffer length immediately before each object
/// is written. Each one is checked against the buffer before the xref table
/// is emitted.
pub fn serialize(graph: &ObjectGraph) -> Result<PdfBytes> {
    let mut out = Vec::with_capacity(1024 + graph.len() * 256);
    let mut offsets = Vec::with_capacity(graph.len());

    out.extend_from_slice(PDF_HEADER);

    for (id, object) in graph.iter() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        object.write_body(&mut out);
        out.extend_from_slice(b"\nendobj\n\n");
    }

    check_offsets(&out, &offsets)?;

    let xref_offset = out.len();
    let size = graph.len() + 1;
    out.extend_from_slice(format!("xref\n0 {}\n", size).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }

    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {} >>\nstartxref\n{}\n",
            size,
            ObjectId::CATALOG.reference(),
            xref_offset
        )
        .as_bytes(),
    );
    out.extend_from_slice(PDF_EOF);

    log::debug!(
        "Serialized {} objects into {} bytes (xref at {})",
        graph.len(),
        out.len(),
        xref_offset
    );

    Ok(PdfBytes {
        bytes: out,
        offsets,
        page_count: graph.page_count(),
    })
}

fn check_offsets(out: &[u8], offsets: &[usize]) -> Result<()> {
    for (i, &offset) in offsets.iter().enumerate() {
        let marker = format!("{} 0 obj", i + 1);
        if !out[offset..].starts_with(marker.as_bytes()) {
            return Err(Error::BuildInvariant(format!(
                "offset {} for object {} does not start its definition",
                offset,
                i + 1
            )));
        }
    }
    Ok(())
}
