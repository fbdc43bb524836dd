//! Benchmarks for gap-buffer editing.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use inkdown::buffer::GapBuffer;

fn bench_local_typing(c: &mut Criterion) {
    // Sequential inserts at one position: the gap never has to move.
    c.bench_function("local_typing", |b| {
        b.iter(|| {
            let mut buf = GapBuffer::new();
            for i in 0..1000 {
                buf.insert(black_box(i), "x");
            }
            buf
        })
    });
}

fn bench_scattered_edits(c: &mut Criterion) {
    // Alternating front/back edits force a gap move every time.
    let base = "lorem ipsum\n".repeat(500);
    c.bench_function("scattered_edits", |b| {
        b.iter(|| {
            let mut buf = GapBuffer::from_text(&base);
            for i in 0..200 {
                if i % 2 == 0 {
                    buf.insert(black_box(0), "x");
                } else {
                    buf.insert(black_box(buf.len()), "y");
                }
            }
            buf
        })
    });
}

fn bench_line_lookup(c: &mut Criterion) {
    let text = "line of text\n".repeat(2000);
    let buf = GapBuffer::from_text(&text);
    c.bench_function("offset_from_line", |b| {
        b.iter(|| buf.offset_from_line(black_box(1500), 0))
    });
}

criterion_group!(
    benches,
    bench_local_typing,
    bench_scattered_edits,
    bench_line_lookup
);
criterion_main!(benches);
