// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use handlebox_gesture::{EngineConfig, Stage};
use kurbo::{Point, Rect};

fn build_stage(n: u32) -> Stage<u32> {
    let mut stage = Stage::new(EngineConfig::default());
    for i in 0..n {
        let x = f64::from(i % 16) * 130.0;
        let y = f64::from(i / 16) * 330.0;
        stage.insert(i, Rect::new(x, y, x + 120.0, y + 320.0));
    }
    stage
}

fn bench_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("handlebox_gesture/stage");

    for &n in &[16_u32, 256_u32] {
        let last = n - 1;
        let origin = {
            let stage = build_stage(n);
            stage.item(&last).map_or(Point::ZERO, |item| item.center())
        };

        group.bench_function(format!("move_drag(n={n})"), |b| {
            b.iter_batched(
                || build_stage(n),
                |mut stage| {
                    stage.on_touch_begin(&last, origin);
                    for step in 1..=60 {
                        let p = origin + (f64::from(step), f64::from(step) * 0.5);
                        black_box(stage.on_touch_move(&last, p));
                    }
                    black_box(stage.on_touch_end(&last));
                    stage
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("pinch(n={n})"), |b| {
            b.iter_batched(
                || build_stage(n),
                |mut stage| {
                    stage.on_pinch_begin(&last);
                    for step in 0..60 {
                        let scale = 1.0 + f64::from(step) * 0.01;
                        black_box(stage.on_pinch_change(&last, scale));
                    }
                    black_box(stage.on_pinch_end(&last));
                    stage
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stage);
criterion_main!(benches);
