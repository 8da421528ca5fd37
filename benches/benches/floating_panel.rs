// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_floating_panel::{DraggingZone, FloatingPanel, PanSample, PanelConfig};

fn samples(count: usize) -> Vec<PanSample> {
    let mut out = Vec::with_capacity(count + 2);
    out.push(PanSample::began(Point::new(160.0, 390.0)));
    // Drag up and down across the whole fold range.
    for i in 0..count {
        let phase = (i % 100) as f64 / 100.0;
        let y = 390.0 - 380.0 * (phase * std::f64::consts::PI).sin();
        out.push(PanSample::changed(Point::new(160.0, y), Vec2::new(0.0, -200.0)));
    }
    out.push(PanSample::ended(Point::new(160.0, 200.0), Vec2::new(0.0, -1_200.0)));
    out
}

fn bench_floating_panel(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_floating_panel");
    group.sample_size(50);

    let config = PanelConfig::default().with_dragging_zone(DraggingZone::All);
    let bounds = Rect::new(0.0, 0.0, 320.0, 400.0);

    for &count in &[100_usize, 10_000] {
        let gesture = samples(count);
        group.bench_function(format!("gesture(samples={count})"), |b| {
            b.iter_batched(
                || {
                    let mut panel = FloatingPanel::new(bounds, config);
                    panel.set_allow_pan_outside(true);
                    panel
                },
                |mut panel| {
                    for &sample in &gesture {
                        black_box(panel.receive_pan(sample));
                    }
                    black_box(panel.offset());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_floating_panel);
criterion_main!(benches);
