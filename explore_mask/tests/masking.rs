// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `explore_mask` crate.
//!
//! These drive an observer and a set of masks together, the way a page does
//! while the user pans a canvas of cards past the viewport.

use explore_mask::{IntersectionObserver, MaskConfig, MaskView, VisibilityMask};
use kurbo::{Rect, Size, Vec2};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

#[test]
fn placeholder_size_is_stable_while_panning() {
    let observer = IntersectionObserver::new(MaskConfig::default());
    let card = Rect::new(100.0, 100.0, 800.0, 340.0);
    let _guard = observer.observe(0_usize, card);

    let mut mask = VisibilityMask::new();
    let first = mask.measure_once(|| card.size());

    let mut content_size = card.size();
    for pan in [0.0, -2000.0, 0.0, -5000.0, 0.0] {
        for (_, entry) in observer.tick(VIEWPORT, |r| r + Vec2::new(pan, 0.0)) {
            mask.observe(&entry, observer.config().threshold);
        }
        // The live content keeps changing size; the mask ignores it.
        content_size = Size::new(content_size.width + 50.0, content_size.height + 10.0);
        mask.measure_once(|| content_size);

        match mask.view() {
            MaskView::Placeholder { size } => assert_eq!(size, first),
            MaskView::Content { min_size } => assert_eq!(min_size, Some(first)),
        }
        assert_eq!(mask.overlay().size, first);
    }
}

#[test]
fn card_far_outside_never_shows_content() {
    let observer = IntersectionObserver::new(MaskConfig::default());
    let _guard = observer.observe("far", Rect::new(10_000.0, 10_000.0, 10_700.0, 10_200.0));
    let mut mask = VisibilityMask::new();
    let size = mask.measure_once(|| Size::new(700.0, 200.0));

    let mut reports = 0;
    for step in 0..20 {
        let pan = Vec2::new(f64::from(step) * -10.0, 0.0);
        for (_, entry) in observer.tick(VIEWPORT, |r| r + pan) {
            reports += 1;
            mask.observe(&entry, observer.config().threshold);
        }
        assert_eq!(mask.view(), MaskView::Placeholder { size });
        assert!(mask.overlay().visible);
    }
    assert_eq!(reports, 1, "only the initial observation is reported");

    // Bring it into view.
    for (_, entry) in observer.tick(VIEWPORT, |r| r - Vec2::new(9_900.0, 9_900.0)) {
        mask.observe(&entry, observer.config().threshold);
    }
    assert!(matches!(mask.view(), MaskView::Content { .. }));
}

#[cfg(feature = "serde")]
#[test]
fn config_roundtrips_through_json() {
    use explore_mask::MaskThreshold;

    let config: MaskConfig = serde_json::from_str(r#"{ "threshold": "Occluded" }"#).unwrap();
    assert_eq!(config.threshold, MaskThreshold::Occluded);
    assert_eq!(config.root_margin, kurbo::Insets::ZERO);
}
