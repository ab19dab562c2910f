//! HTML normalization: markup in, paragraph-separated plain text out.
//!
//! The pipeline is:
//!
//! 1. [`Tokenizer`] splits the input into text runs and tags, dropping
//!    comments and `script`/`style` bodies.
//! 2. `br` becomes a newline, block tags (`h1`-`h6`, `p`, `div`, `section`)
//!    become a paragraph break, every other tag disappears.
//! 3. Entities in text runs are decoded in a single pass.
//! 4. Whitespace inside text collapses to single spaces and runs of three or
//!    more newlines collapse to exactly two.
//!
//! # Example
//!
//! ```
//! use grimoire_pdf::normalize;
//!
//! let text = normalize("<h1>Liber</h1><p>Primeira&nbsp;linha<br>segunda</p>");
//! assert_eq!(text, "Liber\n\nPrimeira linha\nsegunda");
//! ```

mod entities;
mod options;
mod tokenizer;

pub use entities::decode_entities;
pub use options::NormalizeOptions;
pub use tokenizer::{Tag, TagKind, Token, Tokenizer};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalize HTML with default options.
///
/// Never fails: malformed markup degrades to text.
pub fn normalize(html: &str) -> String {
    Normalizer::default().normalize(html)
}

/// HTML normalizer.
pub struct Normalizer {
    options: NormalizeOptions,
    whitespace_regex: Regex,
    spaces_regex: Regex,
    line_edge_regex: Regex,
    newlines_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl Normalizer {
    /// Create a new normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            spaces_regex: Regex::new(r" {2,}").unwrap(),
            line_edge_regex: Regex::new(r" *\n *").unwrap(),
            newlines_regex: Regex::new(r"\n{3,}").unwrap(),
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
                ("\u{FB05}", "st"),
                ("\u{FB06}", "st"),
            ],
        }
    }

    /// Convert markup to plain text with `"\n\n"` paragraph breaks.
    pub fn normalize(&self, html: &str) -> String {
        let mut output = String::with_capacity(html.len());

        for token in Tokenizer::new(html) {
            match token {
                Token::Text(text) => {
                    let decoded = decode_entities(text);
                    output.push_str(&self.whitespace_regex.replace_all(&decoded, " "));
                }
                Token::Tag(tag) => match tag.kind() {
                    TagKind::LineBreak => output.push('\n'),
                    TagKind::Block => output.push_str("\n\n"),
                    TagKind::RawText | TagKind::Inline => {}
                },
            }
        }

        let output = self.cleanup(output);
        let output = self.spaces_regex.replace_all(&output, " ");
        let output = self.line_edge_regex.replace_all(&output, "\n");
        let output = self.newlines_regex.replace_all(&output, "\n\n");

        output.trim().to_string()
    }

    /// Apply only the Unicode cleanup stage to plain text such as a title.
    ///
    /// Markup and whitespace are left as written.
    pub fn clean_text(&self, text: &str) -> String {
        self.cleanup(text.to_string())
    }

    fn cleanup(&self, text: String) -> String {
        let mut result = text;

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                if result.contains(ligature) {
                    result = result.replace(ligature, replacement);
                }
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        result
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}
