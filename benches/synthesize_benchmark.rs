//! Benchmarks for grimoire-pdf synthesis performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks synthesize documents from generated HTML of increasing
//! length.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grimoire_pdf::{normalize, paginate, DocumentRequest};

/// Creates an HTML body with the given number of paragraphs.
fn create_test_html(paragraphs: usize) -> String {
    let mut html = String::from("<h1>Liber Abyssi</h1>");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph {} &amp; its <em>inline</em> markup. {}</p>",
            i,
            "Verba volant, scripta manent. ".repeat(6)
        ));
        if i % 10 == 0 {
            html.push_str("<script>var ignored = '<p>';</script><br/>");
        }
    }
    html
}

/// Benchmark HTML normalization.
fn bench_normalize(c: &mut Criterion) {
    let html = create_test_html(200);

    c.bench_function("normalize_200_paragraphs", |b| {
        b.iter(|| normalize(black_box(&html)));
    });
}

/// Benchmark pagination of normalized text.
fn bench_paginate(c: &mut Criterion) {
    let text = normalize(&create_test_html(200));

    c.bench_function("paginate_200_paragraphs", |b| {
        b.iter(|| paginate(black_box(&text), 45, 90));
    });
}

/// Benchmark the full pipeline at various sizes.
fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for paragraphs in [1, 50, 500].iter() {
        let request = DocumentRequest::new("Liber Abyssi", create_test_html(*paragraphs));

        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| grimoire_pdf::synthesize(black_box(&request)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_paginate, bench_synthesize);
criterion_main!(benches);
