//! Integration tests for pagination.

use grimoire_pdf::{
    normalize, paginate, wrap_line, DEFAULT_MAX_LINES_PER_PAGE, DEFAULT_MAX_LINE_WIDTH,
};

/// Deterministic pseudo-random text with words of mixed length.
fn sample_text(seed: u64, words: usize) -> String {
    let mut state = seed;
    let mut out = String::new();
    for i in 0..words {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let len = 1 + (state >> 33) as usize % 14;
        let word: String = (0..len)
            .map(|j| (b'a' + ((state >> (j % 32)) % 26) as u8) as char)
            .collect();
        out.push_str(&word);
        out.push(match (state >> 40) % 23 {
            0 => '\n',
            1 => '\n',
            2 if i % 2 == 0 => '\n',
            _ => ' ',
        });
    }
    out.trim().to_string()
}

#[test]
fn test_word_preservation() {
    for seed in 1..40u64 {
        let text = normalize(&sample_text(seed, 600));
        for (lines, width) in [(45, 90), (10, 20), (3, 7), (1, 1)] {
            let pages = paginate(&text, lines, width);
            let paged: Vec<&str> = pages.iter().flat_map(|p| p.words()).collect();
            let source: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(paged, source, "seed {} lines {} width {}", seed, lines, width);
        }
    }
}

#[test]
fn test_line_width_enforced() {
    for seed in 1..40u64 {
        let text = sample_text(seed, 400);
        for width in [5, 12, 30, 90] {
            for page in paginate(&text, 20, width) {
                for line in &page.lines {
                    let fits = line.chars().count() <= width;
                    let single_word = line.split_whitespace().count() == 1;
                    assert!(fits || single_word, "line {:?} exceeds {}", line, width);
                }
            }
        }
    }
}

#[test]
fn test_page_sizes_bounded() {
    let text = sample_text(7, 2000);
    let pages = paginate(&text, 17, 40);

    assert!(pages.len() > 1);
    for (i, page) in pages.iter().enumerate() {
        assert!(page.line_count() <= 17);
        assert!(!page.is_empty());
        assert_eq!(page.number as usize, i + 1);
    }
    // only the last page may be short
    for page in &pages[..pages.len() - 1] {
        assert_eq!(page.line_count(), 17);
    }
}

#[test]
fn test_paragraph_gaps_kept() {
    let text = normalize("<p>first</p><p>second</p>");
    let pages = paginate(&text, DEFAULT_MAX_LINES_PER_PAGE, DEFAULT_MAX_LINE_WIDTH);
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].lines, vec!["first", "", "second"]);
}

#[test]
fn test_concrete_scenario_wrapping() {
    let text = normalize(&format!("<h1>A</h1><p>{}</p>", "word ".repeat(50)));
    let pages = paginate(&text, DEFAULT_MAX_LINES_PER_PAGE, DEFAULT_MAX_LINE_WIDTH);

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].lines[0], "A");
    assert_eq!(pages[0].lines[1], "");
    // 18 words of 4 chars plus 17 spaces fill 89 columns
    assert_eq!(pages[0].lines[2], vec!["word"; 18].join(" "));
    assert_eq!(pages[0].words().count(), 51);
}

#[test]
fn test_empty_text() {
    let pages = paginate("", DEFAULT_MAX_LINES_PER_PAGE, DEFAULT_MAX_LINE_WIDTH);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_empty());
}

#[test]
fn test_wrap_line_public() {
    assert_eq!(wrap_line("um dois três quatro", 9), vec!["um dois", "três", "quatro"]);
}
