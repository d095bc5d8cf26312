// Copyright 2025 the Tangent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `tangent_scenario`: recomputation on drag and full redraws.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

use tangent_calculus::FunctionId;
use tangent_imaging::RecordingSurface;
use tangent_scenario::{Scenario, ScenarioConfig, ScenarioKind};

fn scenario(kind: ScenarioKind) -> Scenario<RecordingSurface> {
    let config = ScenarioConfig {
        function: FunctionId::Sine,
        lower: -1.0,
        upper: 3.0,
        ..ScenarioConfig::default()
    };
    let surface = RecordingSurface::new(Size::new(1024.0, 768.0)).with_frame_limit(1);
    Scenario::init(kind, surface, config).unwrap()
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/drag");
    for kind in [
        ScenarioKind::DefiniteIntegral,
        ScenarioKind::MeanValueIntegral,
        ScenarioKind::Additivity,
    ] {
        group.bench_function(format!("{kind:?}"), |b| {
            b.iter_batched(
                || scenario(kind),
                |mut s| {
                    let start = s.handles().iter().nth(1).map_or(Point::ZERO, |h| h.position);
                    s.pointer_down(start);
                    for i in 1..=16 {
                        s.pointer_move(Point::new(start.x - f64::from(i) * 4.0, start.y));
                    }
                    s.pointer_up();
                    black_box(s.report().integral)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/render");
    for kind in ScenarioKind::ALL {
        let mut s = scenario(kind);
        group.bench_function(format!("{kind:?}"), |b| {
            b.iter(|| {
                s.render();
                black_box(s.surface().events().len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_drag, bench_render);
criterion_main!(benches);
