//! Markup tokenizer.
//!
//! A small state machine that splits HTML-ish input into text runs and
//! tags. Comments and the bodies of `script`/`style` elements are consumed
//! without producing tokens.

/// A token produced by [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw text between tags; entities are still encoded.
    Text(&'a str),
    /// An opening, closing or self-closing tag.
    Tag(Tag<'a>),
}

/// A parsed tag. Attributes are not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag name as written in the source
    pub name: &'a str,
    /// `</name>`
    pub closing: bool,
    /// `<name/>`
    pub self_closing: bool,
}

/// How a tag affects the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `br`: a single newline
    LineBreak,
    /// Headings, `p`, `div`, `section`: a paragraph break
    Block,
    /// `script`/`style`: the element body is discarded
    RawText,
    /// Anything else is dropped
    Inline,
}

const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "section"];
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

impl<'a> Tag<'a> {
    /// Parse the text between `<` and `>`.
    fn parse(inner: &'a str) -> Self {
        let (closing, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, inner),
        };
        let body = body.trim_start();
        let name_end = body
            .find(|c: char| c.is_ascii_whitespace() || c == '/')
            .unwrap_or(body.len());

        Self {
            name: &body[..name_end],
            closing,
            self_closing: inner.trim_end().ends_with('/'),
        }
    }

    /// Classify the tag by name, ignoring ASCII case.
    pub fn kind(&self) -> TagKind {
        let is = |names: &[&str]| names.iter().any(|n| self.name.eq_ignore_ascii_case(n));

        if self.name.eq_ignore_ascii_case("br") {
            TagKind::LineBreak
        } else if is(BLOCK_TAGS) {
            TagKind::Block
        } else if is(RAW_TEXT_TAGS) {
            TagKind::RawText
        } else {
            TagKind::Inline
        }
    }

    /// Whether this tag opens an element whose body must be skipped.
    fn opens_raw_text(&self) -> bool {
        !self.closing && !self.self_closing && self.kind() == TagKind::RawText
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<'a> {
    Text,
    Markup,
    Comment,
    RawText(&'a str),
}

/// Iterator over the tokens of an HTML-ish string.
///
/// Malformed input never fails: a `<` that cannot start a tag is text, and a
/// tag with no closing `>` is returned as text.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    state: State<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: State::Text,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];

            match self.state {
                State::Text => match find_markup_start(rest) {
                    Some(0) => self.state = State::Markup,
                    Some(n) => {
                        self.pos += n;
                        self.state = State::Markup;
                        return Some(Token::Text(&rest[..n]));
                    }
                    None => {
                        self.pos = self.input.len();
                        return Some(Token::Text(rest));
                    }
                },
                State::Markup => {
                    if rest.starts_with("<!--") {
                        self.pos += 4;
                        self.state = State::Comment;
                        continue;
                    }

                    let Some(end) = rest.find('>') else {
                        self.pos = self.input.len();
                        self.state = State::Text;
                        return Some(Token::Text(rest));
                    };

                    let tag = Tag::parse(&rest[1..end]);
                    self.pos += end + 1;
                    self.state = if tag.opens_raw_text() {
                        State::RawText(tag.name)
                    } else {
                        State::Text
                    };
                    return Some(Token::Tag(tag));
                }
                State::Comment => {
                    self.pos = match rest.find("-->") {
                        Some(end) => self.pos + end + 3,
                        None => self.input.len(),
                    };
                    self.state = State::Text;
                }
                State::RawText(name) => {
                    self.pos = match find_close_tag(rest, name) {
                        Some(end) => self.pos + end,
                        None => self.input.len(),
                    };
                    self.state = State::Text;
                }
            }
        }
        None
    }
}

/// Byte offset of the first `<` that starts markup.
fn find_markup_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        let next = bytes.get(i + 1).copied()?;
        let starts =
            b == b'<' && (next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?'));
        starts.then_some(i)
    })
}

/// Byte offset just past the `>` of the first `</name ...>` in `text`.
fn find_close_tag(text: &str, name: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let needle_len = name.len() + 2;
    let mut from = 0;

    while from + needle_len <= bytes.len() {
        let i = from + text[from..].find("</")?;
        let candidate = bytes.get(i + 2..i + needle_len)?;
        if candidate.eq_ignore_ascii_case(name.as_bytes()) {
            let after = i + needle_len;
            // `</scripts>` is not `</script>`
            let boundary = bytes
                .get(after)
                .map_or(true, |b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
            if boundary {
                return Some(match text[after..].find('>') {
                    Some(gt) => after + gt + 1,
                    None => text.len(),
                });
            }
        }
        from = i + 2;
    }
    None
}
