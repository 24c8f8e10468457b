// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use explore_event_state::modifiers::{Modifiers, Platform};
use explore_event_state::wheel::WheelInput;
use explore_viewport::{Action, CanvasEngine, ViewportConfig, ViewportController, ViewportState};
use kurbo::{Point, Rect, Size, Vec2};

const VIEW: Size = Size::new(1280.0, 720.0);
const CANVAS: Size = Size::new(12_000.0, 9_000.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from((self.0 >> 32) as u32) / f64::from(u32::MAX)
    }
}

fn actions(n: usize, seed: u64) -> Vec<Action> {
    let mut rng = Lcg(seed);
    (0..n)
        .map(|i| match i % 4 {
            0 | 1 => Action::Pan {
                offset: Vec2::new(
                    rng.next_f64() * 8000.0 - 4000.0,
                    rng.next_f64() * 6000.0 - 3000.0,
                ),
            },
            2 => Action::Zoom {
                source: explore_viewport::ZoomSource::Wheel,
                scale: 0.1 + rng.next_f64() * 4.0,
                anchor: Point::new(rng.next_f64() * VIEW.width, rng.next_f64() * VIEW.height),
            },
            _ => Action::Resize {
                viewport: Size::new(
                    800.0 + rng.next_f64() * 1200.0,
                    600.0 + rng.next_f64() * 600.0,
                ),
            },
        })
        .collect()
}

fn ready_state() -> ViewportState {
    let mut state = ViewportState::new(VIEW, ViewportConfig::default()).unwrap();
    state.apply(Action::Initialise { canvas: CANVAS });
    state
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("explore_viewport");
    group.sample_size(50);

    for &n in &[256_usize, 4_096] {
        let actions = actions(n, 0xE8F1_0000_0000_0001);
        group.bench_function(format!("apply(n={n})"), |b| {
            b.iter_batched(
                ready_state,
                |mut state| {
                    for action in &actions {
                        black_box(state.apply(*action));
                    }
                    black_box(state.minimap().map(|m| m.indicator()));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("wheel_zoom_controller(n=1024)", |b| {
        b.iter_batched(
            || {
                let mut controller =
                    ViewportController::new(VIEW, ViewportConfig::default()).unwrap();
                let engine = CanvasEngine::new(Rect::from_origin_size(Point::ZERO, VIEW));
                controller.mount(engine, CANVAS);
                controller
            },
            |mut controller| {
                for i in 0..1024_u32 {
                    let delta = if i % 3 == 0 { 1.0 } else { -1.0 };
                    let pos = Point::new(f64::from(i % 1280), f64::from(i % 720));
                    let input = WheelInput::new(delta, pos, Modifiers::CTRL);
                    black_box(controller.wheel(&input, Platform::Other));
                }
                black_box(controller.state().scale());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_viewport);
criterion_main!(benches);
