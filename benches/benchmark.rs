use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eventsnap::parse_event;

const POSTER: &str = "HACKABOT 2025\n\n  7-hour coding sprint  \n13 December 2025\nat Campus 25\n\nPrizes worth 50k\nRegister now\n";

fn bench_parse_event(c: &mut Criterion) {
    c.bench_function("parse_event poster", |b| b.iter(|| parse_event(black_box(POSTER))));

    // worst case for the date scan: many lines, no date anywhere
    let noisy: String = (0..500).map(|i| format!("line {} of garbled ocr output ~~ |\n", i)).collect();
    c.bench_function("parse_event no date", |b| b.iter(|| parse_event(black_box(&noisy))));
}

criterion_group!(benches, bench_parse_event);
criterion_main!(benches);
