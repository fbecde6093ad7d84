use binfill_core::display::{gradient_color, render_bar};
use binfill_core::fill::fill_percentage;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_fill(c: &mut Criterion) {
    c.bench_function("fill_percentage", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for current in 0..200 {
                acc += fill_percentage(black_box(Some(100.0)), black_box(Some(current as f32)));
            }
            acc
        })
    });
}

fn bench_presentation(c: &mut Criterion) {
    c.bench_function("render_bar_16", |b| {
        b.iter(|| render_bar(black_box(62.5), black_box(16)))
    });
    c.bench_function("gradient_color", |b| {
        b.iter(|| gradient_color(black_box(62.5)))
    });
}

criterion_group!(benches, bench_fill, bench_presentation);
criterion_main!(benches);
