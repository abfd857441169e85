use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempora_core::{find_date_with_config, Document, FinderConfig};

/// Synthetic page with no structured metadata, forcing the whole-document
/// regex scan (the hot path).
fn noisy_page(paragraphs: usize) -> String {
    let mut body = String::new();
    for i in 0..paragraphs {
        body.push_str(&format!(
            "<div><p>Section {} covers assorted figures like {} units and more.</p></div>",
            i,
            i * 7 + 13,
        ));
        if i % 17 == 0 {
            body.push_str("<p>archived 12.07.2016 by the desk</p>");
        }
    }
    format!(
        "<html><head><title>Annual figures</title></head><body>{}<footer>© Example 2016</footer></body></html>",
        body,
    )
}

fn bench_parse(c: &mut Criterion) {
    let html = noisy_page(200);
    c.bench_function("parse_document", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_fast_cascade(c: &mut Criterion) {
    let html = noisy_page(200);
    let config = FinderConfig { extensive: false, ..Default::default() };

    c.bench_function("fast_cascade", |b| {
        b.iter(|| find_date_with_config(black_box(&html), black_box(&config)))
    });
}

fn bench_extensive_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("extensive_scan");
    let config = FinderConfig::default();

    for size in [50usize, 200, 800] {
        let html = noisy_page(size);
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| find_date_with_config(black_box(&html), black_box(&config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_fast_cascade, bench_extensive_scan);
criterion_main!(benches);
