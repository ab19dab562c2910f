//! Single-byte WinAnsi (Windows-1252) text encoding.
//!
//! Every character becomes exactly one byte so that lengths measured while
//! building a content stream stay valid in the file.

/// Byte written for characters WinAnsi cannot represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Characters in the 0x80-0x9F block, indexed by `byte - 0x80`.
const HIGH_BLOCK: [Option<char>; 32] = [
    Some('\u{20AC}'), // €
    None,
    Some('\u{201A}'), // ‚
    Some('\u{0192}'), // ƒ
    Some('\u{201E}'), // „
    Some('\u{2026}'), // …
    Some('\u{2020}'), // †
    Some('\u{2021}'), // ‡
    Some('\u{02C6}'), // ˆ
    Some('\u{2030}'), // ‰
    Some('\u{0160}'), // Š
    Some('\u{2039}'), // ‹
    Some('\u{0152}'), // Œ
    None,
    Some('\u{017D}'), // Ž
    None,
    None,
    Some('\u{2018}'), // ‘
    Some('\u{2019}'), // ’
    Some('\u{201C}'), // “
    Some('\u{201D}'), // ”
    Some('\u{2022}'), // •
    Some('\u{2013}'), // –
    Some('\u{2014}'), // —
    Some('\u{02DC}'), // ˜
    Some('\u{2122}'), // ™
    Some('\u{0161}'), // š
    Some('\u{203A}'), // ›
    Some('\u{0153}'), // œ
    None,
    Some('\u{017E}'), // ž
    Some('\u{0178}'), // Ÿ
];

/// Map one character to its WinAnsi byte.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x00..=0x7F | 0xA0..=0xFF => Some(code as u8),
        _ => HIGH_BLOCK
            .iter()
            .position(|&slot| slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encode text as WinAnsi, one byte per character.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT_BYTE))
        .collect()
}
