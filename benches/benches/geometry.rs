// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use handlebox_geometry::{
    Corner, HandleLayout, HandleMetrics, HandleVisibility, HitParams, TransformableItem, hit_test,
};
use kurbo::{Point, Rect, Vec2};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn transformed_item() -> TransformableItem {
    let mut item = TransformableItem::new(Rect::new(100.0, 100.0, 220.0, 420.0));
    item.rotate(0.6);
    item.scale(1.3);
    item
}

fn probe_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| Point::new(rng.next_f64() * 500.0, rng.next_f64() * 600.0))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("handlebox_geometry/layout");
    let layout = HandleLayout::new(HandleMetrics::default());
    let item = transformed_item();

    group.bench_function("layout", |b| {
        b.iter(|| black_box(layout.layout(black_box(&item))));
    });
    group.bench_function("corners", |b| {
        b.iter(|| black_box(black_box(&item).corners()));
    });
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("handlebox_geometry/hit_test");
    let layout = HandleLayout::new(HandleMetrics::default());
    let item = transformed_item();
    let points = probe_points(1_024, 0x4A4E_0000_0000_0001);
    let params = HitParams::default();

    for (name, visibility) in [
        ("hidden", HandleVisibility::Hidden),
        ("shown", HandleVisibility::Shown),
    ] {
        let handles = layout.layout(&item).with_visibility(visibility);
        group.bench_function(format!("{name}(n={})", points.len()), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for &p in &points {
                    if hit_test(&item, &handles, p, &params).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("handlebox_geometry/resize");
    group.bench_function("drag_frames(n=120)", |b| {
        b.iter_batched(
            transformed_item,
            |mut item| {
                item.begin_resize(Corner::BottomRight);
                for _ in 0..120 {
                    item.resize(Corner::BottomRight, Vec2::new(0.5, 0.25), 0.375);
                }
                item.end_resize();
                black_box(item)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_layout, bench_hit_test, bench_resize);
criterion_main!(benches);
