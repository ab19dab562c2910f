//! Content stream text operators.

use super::encoding::encode_win_ansi;

/// Resource name of the shared font in every page's `/Resources`.
pub const FONT_RESOURCE: &str = "F1";

/// Escape a line for use inside a PDF literal string.
///
/// Backslash and parentheses are escaped; line breaks and other control
/// characters become spaces so a literal never spans lines.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            c if c.is_control() => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Builder for the operators of one content stream.
///
/// Operators are accumulated as text, one per line, and encoded to
/// WinAnsi bytes by [`ContentBuilder::finish`].
#[derive(Debug, Default)]
pub struct ContentBuilder {
    ops: String,
}

impl ContentBuilder {
    /// Create an empty content stream.
    pub fn new() -> Self {
        Self::default()
    }

    fn op(&mut self, op: &str) -> &mut Self {
        self.ops.push_str(op);
        self.ops.push('\n');
        self
    }

    /// `BT`
    pub fn begin_text(&mut self) -> &mut Self {
        self.op("BT")
    }

    /// `ET`
    pub fn end_text(&mut self) -> &mut Self {
        self.op("ET")
    }

    /// `/F1 size Tf`
    pub fn set_font(&mut self, size: u32) -> &mut Self {
        self.op(&format!("/{} {} Tf", FONT_RESOURCE, size))
    }

    /// `leading TL`
    pub fn set_leading(&mut self, leading: u32) -> &mut Self {
        self.op(&format!("{} TL", leading))
    }

    /// `x y Td`, relative to the start of the current line.
    pub fn move_to(&mut self, x: i64, y: i64) -> &mut Self {
        self.op(&format!("{} {} Td", x, y))
    }

    /// `(text) Tj`
    pub fn show(&mut self, text: &str) -> &mut Self {
        self.op(&format!("({}) Tj", escape_text(text)))
    }

    /// `(text) Tj T*`: show a line and advance to the next one.
    pub fn show_line(&mut self, text: &str) -> &mut Self {
        self.ops.push_str(&format!("({}) Tj T*\n", escape_text(text)));
        self
    }

    /// Encode the stream body. The trailing newline is dropped; the
    /// writer adds its own before `endstream`.
    pub fn finish(&self) -> Vec<u8> {
        encode_win_ansi(self.ops.strip_suffix('\n').unwrap_or(&self.ops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape_text(r"a\b"), r"a\\b");
        assert_eq!(escape_text("f(x)"), r"f\(x\)");
    }

    #[test]
    fn test_escape_line_breaks() {
        assert_eq!(escape_text("one\r\ntwo\tthree"), "one  two three");
        assert!(!escape_text("a\nb").contains('\n'));
    }

    #[test]
    fn test_escape_keeps_non_ascii() {
        assert_eq!(escape_text("Grimório"), "Grimório");
    }

    #[test]
    fn test_builder_ops() {
        let mut content = ContentBuilder::new();
        content
            .begin_text()
            .set_font(11)
            .set_leading(14)
            .move_to(50, 700)
            .show_line("(hi)")
            .end_text();

        let bytes = content.finish();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "BT\n/F1 11 Tf\n14 TL\n50 700 Td\n(\\(hi\\)) Tj T*\nET"
        );
    }

    #[test]
    fn test_finish_is_single_byte() {
        let mut content = ContentBuilder::new();
        content.show("ação");
        assert_eq!(content.finish(), b"(a\xe7\xe3o) Tj".to_vec());
    }
}
