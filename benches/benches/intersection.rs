// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use explore_mask::{IntersectionObserver, MaskConfig, Observation, VisibilityMask};
use explore_page::{CardRegistry, ExampleCard, GridMetrics};
use kurbo::{Affine, Rect, Vec2};

const VIEW: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

fn registry(components: u32, examples: u32) -> CardRegistry {
    let mut registry = CardRegistry::new();
    for c in 0..components {
        registry.push(
            format!("C{c}"),
            (0..examples)
                .map(|e| ExampleCard::new(format!("e{e}"), 120.0 + f64::from(e % 5) * 40.0)),
        );
    }
    registry
}

fn observed(
    registry: &CardRegistry,
) -> (IntersectionObserver<usize>, Vec<Observation<usize>>, Vec<VisibilityMask>) {
    let layout = registry.layout(&GridMetrics::default());
    let observer = IntersectionObserver::new(MaskConfig::default());
    let guards = layout
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| observer.observe(i, card.bounds))
        .collect();
    let masks = layout
        .cards
        .iter()
        .map(|card| {
            let mut mask = VisibilityMask::new();
            mask.measure_once(|| card.bounds.size());
            mask
        })
        .collect();
    (observer, guards, masks)
}

fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("explore_mask");
    group.sample_size(50);

    for &(components, examples) in &[(16_u32, 4_u32), (64_u32, 8_u32), (256_u32, 8_u32)] {
        let registry = registry(components, examples);
        let cards = registry.card_count();

        group.bench_function(format!("layout(cards={cards})"), |b| {
            b.iter(|| black_box(registry.layout(&GridMetrics::default())));
        });

        group.bench_function(format!("first_tick(cards={cards})"), |b| {
            b.iter_batched(
                || observed(&registry),
                |(observer, guards, mut masks)| {
                    let threshold = observer.config().threshold;
                    for (i, entry) in observer.tick(VIEW, |r| r) {
                        masks[i].observe(&entry, threshold);
                    }
                    black_box((guards, masks));
                },
                BatchSize::LargeInput,
            );
        });

        // A slow horizontal pan: most ticks report nothing or a handful of cards.
        group.bench_function(format!("pan_ticks(cards={cards},steps=64)"), |b| {
            b.iter_batched(
                || {
                    let state = observed(&registry);
                    state.0.tick(VIEW, |r| r);
                    state
                },
                |(observer, guards, mut masks)| {
                    let threshold = observer.config().threshold;
                    for step in 0..64_u32 {
                        let to_view = Affine::translate(Vec2::new(-f64::from(step) * 48.0, 0.0));
                        for (i, entry) in observer.tick(VIEW, |r| to_view.transform_rect_bbox(r)) {
                            masks[i].observe(&entry, threshold);
                        }
                    }
                    black_box((guards, masks));
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_intersection);
criterion_main!(benches);
