//! PDF header detection and structural verification.
//!
//! [`verify`] re-reads a file produced by this crate and checks the
//! properties a reader depends on: every xref entry points at its object,
//! every `/Length` matches its stream body, and the page tree lists exactly
//! `/Count` page objects. It understands the layout [`crate::pdf::serialize`]
//! writes; it is not a general PDF parser.

use crate::error::{Error, Result};
use crate::pdf::PDF_EOF;
use serde::Serialize;
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.4")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.4"
const XREF_ENTRY_LEN: usize = 20;
const FREE_ENTRY: &[u8] = b"0000000000 65535 f \n";

/// Detect the PDF version from the first bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::Malformed("missing %PDF- header".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::Malformed(format!("invalid version {:?}", version)));
    }

    Ok(PdfFormat { version })
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// A content stream found during verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    /// Object number
    pub object: u32,
    /// Declared and measured body length
    pub length: usize,
}

/// Summary of a verified file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Header version
    pub version: String,
    /// Objects listed in the xref table, entry 0 excluded
    pub object_count: usize,
    /// `/Count` of the page tree
    pub page_count: usize,
    /// Byte offset of the `xref` keyword
    pub xref_offset: usize,
    /// Every content stream in object order
    pub streams: Vec<StreamInfo>,
}

/// Verify a PDF file on disk.
pub fn verify_file<P: AsRef<Path>>(path: P) -> Result<VerifyReport> {
    let data = std::fs::read(path)?;
    verify(&data)
}

/// Verify the structure of a PDF buffer.
pub fn verify(data: &[u8]) -> Result<VerifyReport> {
    let format = detect_format_from_bytes(data)?;

    if !data.ends_with(PDF_EOF) {
        return Err(malformed("file does not end with %%EOF"));
    }

    let xref_offset = read_startxref(data)?;
    let (offsets, trailer_pos) = read_xref(data, xref_offset)?;
    let size = offsets.len() + 1;
    read_trailer(&data[trailer_pos..], size)?;

    let mut streams = Vec::new();
    for (i, &offset) in offsets.iter().enumerate() {
        let number = i as u32 + 1;
        let body = object_body(data, number, offset)?;
        if let Some(length) = check_stream(data, number, offset, body)? {
            streams.push(StreamInfo {
                object: number,
                length,
            });
        }
    }

    let page_count = check_page_tree(data, &offsets)?;

    log::debug!(
        "Verified {} objects, {} pages, {} streams",
        offsets.len(),
        page_count,
        streams.len()
    );

    Ok(VerifyReport {
        version: format.version,
        object_count: offsets.len(),
        page_count,
        xref_offset,
        streams,
    })
}

fn malformed(msg: impl Into<String>) -> Error {
    Error::Malformed(msg.into())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Parse a decimal number at the start of `data`; returns it with the
/// number of digits consumed.
fn parse_number(data: &[u8]) -> Option<(usize, usize)> {
    let digits = data.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let text = std::str::from_utf8(&data[..digits]).ok()?;
    Some((text.parse().ok()?, digits))
}

/// Parse the number that follows `key` in `body`.
fn number_after(body: &[u8], key: &[u8]) -> Option<usize> {
    let start = find(body, key)? + key.len();
    parse_number(&body[start..]).map(|(n, _)| n)
}

fn read_startxref(data: &[u8]) -> Result<usize> {
    let keyword = b"startxref\n";
    let pos = rfind(data, keyword).ok_or_else(|| malformed("missing startxref"))?;
    parse_number(&data[pos + keyword.len()..])
        .map(|(n, _)| n)
        .ok_or_else(|| malformed("startxref is not followed by an offset"))
}

/// Read the xref table; returns object offsets (object 1 first) and the
/// position just past the last entry.
fn read_xref(data: &[u8], xref_offset: usize) -> Result<(Vec<usize>, usize)> {
    let section = data
        .get(xref_offset..)
        .filter(|s| s.starts_with(b"xref\n0 "))
        .ok_or_else(|| malformed(format!("no xref section at offset {}", xref_offset)))?;

    let (size, digits) =
        parse_number(&section[7..]).ok_or_else(|| malformed("xref subsection has no size"))?;
    let mut pos = xref_offset + 7 + digits;
    if data.get(pos) != Some(&b'\n') || size == 0 {
        return Err(malformed("malformed xref subsection header"));
    }
    pos += 1;

    if data.get(pos..pos + XREF_ENTRY_LEN) != Some(FREE_ENTRY) {
        return Err(malformed("xref entry 0 is not the free-list head"));
    }
    pos += XREF_ENTRY_LEN;

    let available = (data.len() - pos) / XREF_ENTRY_LEN;
    if available < size - 1 {
        return Err(malformed(format!(
            "xref lists {} objects but only {} entries fit in the file",
            size - 1,
            available
        )));
    }

    let mut offsets = Vec::with_capacity(size - 1);
    for number in 1..size {
        let entry = data
            .get(pos..pos + XREF_ENTRY_LEN)
            .ok_or_else(|| malformed(format!("xref entry {} is truncated", number)))?;
        let offset = match parse_number(entry) {
            Some((offset, 10)) if &entry[10..] == b" 00000 n \n" => offset,
            _ => return Err(malformed(format!("xref entry {} is malformed", number))),
        };
        offsets.push(offset);
        pos += XREF_ENTRY_LEN;
    }

    Ok((offsets, pos))
}

fn read_trailer(trailer: &[u8], size: usize) -> Result<()> {
    if !trailer.starts_with(b"trailer\n<<") {
        return Err(malformed("missing trailer after xref table"));
    }
    let declared = number_after(trailer, b"/Size ")
        .ok_or_else(|| malformed("trailer has no /Size"))?;
    if declared != size {
        return Err(malformed(format!(
            "trailer /Size {} but xref lists {} entries",
            declared, size
        )));
    }
    if find(trailer, b"/Root 1 0 R").is_none() {
        return Err(malformed("trailer /Root does not reference object 1"));
    }
    Ok(())
}

/// The bytes following `N 0 obj\n` for object `number`.
fn object_body(data: &[u8], number: u32, offset: usize) -> Result<&[u8]> {
    let marker = format!("{} 0 obj\n", number);
    data.get(offset..)
        .filter(|rest| rest.starts_with(marker.as_bytes()))
        .map(|rest| &rest[marker.len()..])
        .ok_or_else(|| {
            malformed(format!(
                "xref offset {} does not start object {}",
                offset, number
            ))
        })
}

/// Check a stream object's `/Length`; returns `None` for other objects.
fn check_stream(data: &[u8], number: u32, offset: usize, body: &[u8]) -> Result<Option<usize>> {
    let prefix = b"<< /Length ";
    if !body.starts_with(prefix) {
        return match find(body, b"\nendobj") {
            Some(_) => Ok(None),
            None => Err(malformed(format!("object {} has no endobj", number))),
        };
    }

    let (declared, digits) = parse_number(&body[prefix.len()..])
        .ok_or_else(|| malformed(format!("object {} has a non-numeric /Length", number)))?;
    let header_len = prefix.len() + digits;
    if !body[header_len..].starts_with(b" >>\nstream\n") {
        return Err(malformed(format!("object {} has no stream keyword", number)));
    }

    let header = format!("{} 0 obj\n", number).len() + header_len + b" >>\nstream\n".len();
    let start = offset + header;
    let measured = find(&data[start..], b"\nendstream")
        .ok_or_else(|| malformed(format!("object {} has no endstream", number)))?;

    if measured != declared {
        return Err(malformed(format!(
            "object {} declares /Length {} but its stream holds {} bytes",
            number, declared, measured
        )));
    }
    if !data[start + measured..].starts_with(b"\nendstream\nendobj") {
        return Err(malformed(format!("object {} has no endobj", number)));
    }

    Ok(Some(declared))
}

/// Check catalog and page tree references; returns the page count.
fn check_page_tree(data: &[u8], offsets: &[usize]) -> Result<usize> {
    let body_of = |number: usize| referenced_body(data, offsets, number);

    if !body_of(1)?.starts_with(b"<< /Type /Catalog /Pages 2 0 R >>") {
        return Err(malformed("object 1 is not a catalog pointing at object 2"));
    }

    let tree = body_of(2)?;
    if !tree.starts_with(b"<< /Type /Pages /Kids [") {
        return Err(malformed("object 2 is not a page tree"));
    }
    let kids_start = b"<< /Type /Pages /Kids [".len();
    let kids_end = find(tree, b"]").ok_or_else(|| malformed("unterminated /Kids array"))?;
    let kids = parse_references(&tree[kids_start..kids_end])?;

    let count = number_after(tree, b"/Count ").ok_or_else(|| malformed("page tree has no /Count"))?;
    if count != kids.len() {
        return Err(malformed(format!(
            "/Count {} but /Kids lists {} pages",
            count,
            kids.len()
        )));
    }

    for kid in kids {
        let page = body_of(kid)?;
        if !page.starts_with(b"<< /Type /Page /Parent 2 0 R") {
            return Err(malformed(format!("object {} is not a page of object 2", kid)));
        }

        let contents = number_after(page, b"/Contents ")
            .ok_or_else(|| malformed(format!("page {} has no /Contents", kid)))?;
        if !body_of(contents)?.starts_with(b"<< /Length ") {
            return Err(malformed(format!("page {} contents {} is not a stream", kid, contents)));
        }

        let font = number_after(page, b"/Font << /F1 ")
            .ok_or_else(|| malformed(format!("page {} has no /F1 font", kid)))?;
        if !body_of(font)?.starts_with(b"<< /Type /Font") {
            return Err(malformed(format!("page {} font {} is not a font", kid, font)));
        }
    }

    Ok(count)
}

fn referenced_body<'a>(data: &'a [u8], offsets: &[usize], number: usize) -> Result<&'a [u8]> {
    let offset = *offsets
        .get(number.wrapping_sub(1))
        .ok_or_else(|| malformed(format!("reference to missing object {}", number)))?;
    object_body(data, number as u32, offset)
}

/// Parse a run of `N 0 R` references.
fn parse_references(list: &[u8]) -> Result<Vec<usize>> {
    let text = std::str::from_utf8(list).map_err(|_| malformed("non-ASCII /Kids array"))?;
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() % 3 != 0 {
        return Err(malformed("malformed reference list"));
    }

    tokens
        .chunks(3)
        .map(|chunk| match chunk {
            [number, "0", "R"] => number
                .parse()
                .map_err(|_| malformed(format!("bad object number {:?}", number))),
            _ => Err(malformed("malformed reference list")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.4\n1 0 obj";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.version, "1.4");
        assert_eq!(format.to_string(), "PDF 1.4");
    }

    #[test]
    fn test_detect_invalid_format() {
        assert!(matches!(
            detect_format_from_bytes(b"<!DOCTYPE html>"),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(detect_format_from_bytes(b"%PDF"), Err(Error::Malformed(_))));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.4"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_parse_references() {
        assert_eq!(parse_references(b"3 0 R 5 0 R").unwrap(), vec![3, 5]);
        assert_eq!(parse_references(b"").unwrap(), Vec::<usize>::new());
        assert!(parse_references(b"3 0").is_err());
        assert!(parse_references(b"3 1 R").is_err());
    }

    #[test]
    fn test_missing_eof() {
        let result = verify(b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n");
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_bad_startxref() {
        let result = verify(b"%PDF-1.4\nstartxref\n9999\n%%EOF");
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn test_oversized_xref_count() {
        let data = concat!(
            "%PDF-1.4\nxref\n0 2000000000000000000\n",
            "0000000000 65535 f \n",
            "trailer\n<< /Size 2000000000000000000 /Root 1 0 R >>\n",
            "startxref\n9\n%%EOF"
        );
        match verify(data.as_bytes()) {
            Err(Error::Malformed(msg)) => assert!(msg.contains("entries fit in the file")),
            other => panic!("expected malformed xref, got {:?}", other),
        }
    }

    #[test]
    fn test_xref_count_beyond_usize() {
        let data = concat!(
            "%PDF-1.4\nxref\n0 99999999999999999999999\n",
            "0000000000 65535 f \n",
            "startxref\n9\n%%EOF"
        );
        assert!(matches!(verify(data.as_bytes()), Err(Error::Malformed(_))));
    }
}
