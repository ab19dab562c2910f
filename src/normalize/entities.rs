//! HTML entity decoding.

use std::borrow::Cow;

/// The entities the normalizer understands. Names are case-sensitive.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Decode the supported entities in one left-to-right pass.
///
/// Replacement text is never scanned again, so `&amp;lt;` becomes `&lt;`
/// rather than `<`. Unknown entities are left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, replacement)) => {
                out.push_str(replacement);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}
