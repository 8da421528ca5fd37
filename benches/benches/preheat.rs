// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_preheat::{GridAssets, GridLayout, ImageCache, PreheatWindow, difference};

/// Counts requests without caching anything.
#[derive(Default)]
struct Sink {
    requested: usize,
}

impl ImageCache<u64> for Sink {
    fn start_caching(&mut self, assets: &[u64], _: Size) {
        self.requested += assets.len();
    }

    fn stop_caching(&mut self, assets: &[u64], _: Size) {
        self.requested += assets.len();
    }

    fn stop_caching_all(&mut self) {}
}

fn viewports(steps: usize, step: f64) -> Vec<Rect> {
    (0..steps)
        .map(|i| {
            let y = i as f64 * step;
            Rect::new(0.0, y, 390.0, y + 844.0)
        })
        .collect()
}

fn bench_preheat(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_preheat");
    group.sample_size(50);

    group.bench_function("difference(overlapping)", |b| {
        let old = Rect::new(0.0, 0.0, 390.0, 1_688.0);
        let new = Rect::new(0.0, 400.0, 390.0, 2_088.0);
        b.iter(|| black_box(difference(black_box(old), black_box(new))));
    });

    group.bench_function("difference(disjoint)", |b| {
        let old = Rect::new(0.0, 0.0, 390.0, 1_688.0);
        let new = Rect::new(0.0, 9_000.0, 390.0, 10_688.0);
        b.iter(|| black_box(difference(black_box(old), black_box(new))));
    });

    for &(len, step) in &[(10_000_u64, 60.0), (10_000_u64, 400.0), (100_000_u64, 400.0)] {
        let grid = GridLayout::square(390.0, 4, 2.0);
        let assets: Vec<u64> = (0..len).collect();
        let frames = viewports(200, step);

        group.bench_function(format!("scroll(len={len},step={step})"), |b| {
            b.iter_batched(
                || (PreheatWindow::default(), Sink::default()),
                |(mut window, mut sink)| {
                    let locator = GridAssets::new(&grid, &assets);
                    for &viewport in &frames {
                        black_box(window.update(viewport, grid.item_size, &locator, &mut sink));
                    }
                    black_box(sink.requested);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_preheat);
criterion_main!(benches);
