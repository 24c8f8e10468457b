// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection geometry between a card and the viewport root.

use kurbo::{Insets, Rect};

/// Result of intersecting one target with the root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Target bounds in root coordinates.
    pub bounds: Rect,
    /// Root bounds after applying the root margin.
    pub root: Rect,
    /// Fraction of the target's area inside the root, in `[0, 1]`.
    pub ratio: f64,
    /// Whether the target touches or overlaps the root at all.
    ///
    /// Edge-adjacent targets intersect with a ratio of zero.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Intersects `target` with `root` grown by `root_margin`.
    ///
    /// Zero-area targets report a ratio of `1` when they lie within the root
    /// and `0` otherwise. Non-finite geometry never intersects.
    #[must_use]
    pub fn compute(target: Rect, root: Rect, root_margin: Insets) -> Self {
        if !target.is_finite() || !root.is_finite() || !root_margin.is_finite() {
            return Self {
                bounds: target,
                root,
                ratio: 0.0,
                is_intersecting: false,
            };
        }
        let target = target.abs();
        let root = (root.abs() + root_margin).abs();
        let overlap_w = target.x1.min(root.x1) - target.x0.max(root.x0);
        let overlap_h = target.y1.min(root.y1) - target.y0.max(root.y0);
        let is_intersecting = overlap_w >= 0.0 && overlap_h >= 0.0;

        let area = target.area();
        let ratio = if !is_intersecting {
            0.0
        } else if area > 0.0 {
            (overlap_w * overlap_h / area).min(1.0)
        } else {
            1.0
        };

        Self {
            bounds: target,
            root,
            ratio,
            is_intersecting,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Rect};

    use super::IntersectionEntry;

    const ROOT: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn fully_inside_has_ratio_one() {
        let e = IntersectionEntry::compute(Rect::new(10.0, 10.0, 20.0, 20.0), ROOT, Insets::ZERO);
        assert!(e.is_intersecting);
        assert_eq!(e.ratio, 1.0);
    }

    #[test]
    fn half_outside_has_ratio_half() {
        let e = IntersectionEntry::compute(Rect::new(90.0, 0.0, 110.0, 10.0), ROOT, Insets::ZERO);
        assert!(e.is_intersecting);
        assert!((e.ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn disjoint_has_ratio_zero() {
        let e = IntersectionEntry::compute(Rect::new(200.0, 0.0, 210.0, 10.0), ROOT, Insets::ZERO);
        assert!(!e.is_intersecting);
        assert_eq!(e.ratio, 0.0);
    }

    #[test]
    fn edge_adjacent_intersects_with_zero_ratio() {
        let e = IntersectionEntry::compute(Rect::new(100.0, 0.0, 110.0, 10.0), ROOT, Insets::ZERO);
        assert!(e.is_intersecting);
        assert_eq!(e.ratio, 0.0);
    }

    #[test]
    fn root_margin_grows_the_root() {
        let target = Rect::new(105.0, 0.0, 115.0, 10.0);
        let without = IntersectionEntry::compute(target, ROOT, Insets::ZERO);
        let with = IntersectionEntry::compute(target, ROOT, Insets::uniform(20.0));
        assert_eq!(without.ratio, 0.0);
        assert_eq!(with.ratio, 1.0);
        assert_eq!(with.root, Rect::new(-20.0, -20.0, 120.0, 120.0));
    }

    #[test]
    fn zero_area_targets() {
        let inside = IntersectionEntry::compute(Rect::new(5.0, 5.0, 5.0, 5.0), ROOT, Insets::ZERO);
        assert_eq!(inside.ratio, 1.0);
        let outside =
            IntersectionEntry::compute(Rect::new(500.0, 5.0, 500.0, 5.0), ROOT, Insets::ZERO);
        assert_eq!(outside.ratio, 0.0);
    }

    #[test]
    fn nan_geometry_never_intersects() {
        let e =
            IntersectionEntry::compute(Rect::new(f64::NAN, 0.0, 10.0, 10.0), ROOT, Insets::ZERO);
        assert!(!e.is_intersecting);
        assert_eq!(e.ratio, 0.0);
    }
}
