//! Performance benchmarks for bookclean.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic chapter page for both cleaning strategies
//! - Mojibake repair on clean and corrupted text
//! - Synthetic books of growing size for throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use bookclean::encoding::repair_mojibake;
use bookclean::{clean_html, Cleaner, Options, Strategy};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>The Project Gutenberg eBook of Sample Tales</title>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/ebooks">Books</a>
    </nav>
    <div class="chapter">
        <h2>CHAPTER I.</h2>
        <p>It was a dark and stormy night; the rain fell in torrents, except at
        occasional intervals, when it was checked by a violent gust of wind.</p>
        <p>Here is a second paragraph with more content.<br>It carries a kept
        line break.</p>
        <div class="poem">
            Tiger, tiger, burning bright<br>
            In the forests of the night<br><br>
            What immortal hand or eye
        </div>
        <p>* * *</p>
        <p>A third paragraph ensures there is enough text to measure.</p>
    </div>
    <footer>
        <p>Copyright notice</p>
    </footer>
</body>
</html>
"#;

fn bench_clean_dom(c: &mut Criterion) {
    c.bench_function("clean_dom", |b| {
        b.iter(|| clean_html(black_box(SAMPLE_HTML)));
    });
}

fn bench_clean_line_filter(c: &mut Criterion) {
    let cleaner = Cleaner::new(Options {
        strategy: Strategy::LineFilter,
        ..Options::default()
    });

    c.bench_function("clean_line_filter", |b| {
        b.iter(|| cleaner.clean_html(black_box(SAMPLE_HTML)));
    });
}

fn bench_repair(c: &mut Criterion) {
    let clean = "Crème brûlée and jalapeño, said the maître d'hôtel. ".repeat(40);
    let broken: String = clean.bytes().map(char::from).collect();

    let mut group = c.benchmark_group("repair_mojibake");
    group.bench_function("clean", |b| b.iter(|| repair_mojibake(black_box(&clean))));
    group.bench_function("broken", |b| b.iter(|| repair_mojibake(black_box(&broken))));
    group.finish();
}

/// Synthetic books of growing chapter counts
fn bench_book_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("book_size");

    for chapters in [1usize, 10, 100] {
        let mut html = String::from("<html><body><div id=\"book\">");
        for n in 1..=chapters {
            html.push_str(&format!("<h2>CHAPTER {n}</h2>"));
            for _ in 0..10 {
                html.push_str("<p>The quick brown fox jumps over the lazy dog, again and again.</p>");
            }
        }
        html.push_str("</div></body></html>");

        let size_kb = html.len() / 1024;
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("clean", format!("{chapters} chapters ({size_kb}KB)")),
            &html,
            |b, html| {
                b.iter(|| clean_html(black_box(html)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_clean_dom,
    bench_clean_line_filter,
    bench_repair,
    bench_book_sizes
);
criterion_main!(benches);
