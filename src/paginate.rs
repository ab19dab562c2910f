//! Greedy word wrapping and fixed-height pagination.
//!
//! Widths are counted in characters. Every character the PDF writer emits
//! occupies exactly one byte, so character and byte widths agree in the
//! output.

use crate::model::Page;

/// Split normalized text into pages of at most `max_lines_per_page` lines.
///
/// Each newline-separated logical line is wrapped to `max_line_width`
/// characters; a blank logical line is kept as a paragraph gap. A word longer
/// than the width is placed on a line of its own rather than split.
///
/// Always returns at least one page, so empty input still yields a valid
/// (blank) document. Zero limits are treated as one.
///
/// # Example
///
/// ```
/// use grimoire_pdf::paginate;
///
/// let pages = paginate("alpha beta gamma\n\ndelta", 2, 11);
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[0].lines, vec!["alpha beta", "gamma"]);
/// assert_eq!(pages[1].lines, vec!["", "delta"]);
/// ```
pub fn paginate(text: &str, max_lines_per_page: usize, max_line_width: usize) -> Vec<Page> {
    let max_lines = max_lines_per_page.max(1);
    let width = max_line_width.max(1);

    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::with_capacity(max_lines);

    if !text.is_empty() {
        for logical in text.split('\n') {
            for line in wrap_line(logical, width) {
                if current.len() == max_lines {
                    let number = pages.len() as u32 + 1;
                    pages.push(Page::new(number, std::mem::take(&mut current)));
                }
                current.push(line);
            }
        }
    }

    if !current.is_empty() || pages.is_empty() {
        let number = pages.len() as u32 + 1;
        pages.push(Page::new(number, current));
    }

    log::debug!(
        "Paginated {} chars into {} pages ({} lines/page, width {})",
        text.len(),
        pages.len(),
        max_lines,
        width
    );

    pages
}

/// Greedily wrap one logical line to `max_line_width` characters.
///
/// Lines that already fit are returned unchanged (a blank line yields one
/// empty string). Longer lines are rebuilt from their words, joined by single
/// spaces.
pub fn wrap_line(line: &str, max_line_width: usize) -> Vec<String> {
    if line.chars().count() <= max_line_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_line_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }

    lines
}
