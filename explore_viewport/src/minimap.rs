// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

/// Scaled-down map of the canvas with a position indicator.
///
/// The canvas' longer side maps to the configured target size. The indicator
/// marks the canvas point under the viewport's focal anchor and is always kept
/// `edge_threshold` away from the minimap edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
    scale: f64,
    size: Size,
    indicator: Point,
    edge_threshold: f64,
}

impl Minimap {
    /// Builds a minimap for `canvas`, with the indicator at the canvas center.
    ///
    /// Returns `None` if either canvas dimension is not a positive finite number.
    #[must_use]
    pub fn for_canvas(canvas: Size, target: f64, edge_threshold: f64) -> Option<Self> {
        if !is_positive(canvas.width) || !is_positive(canvas.height) || !is_positive(target) {
            return None;
        }
        let scale = target / canvas.width.max(canvas.height);
        let mut minimap = Self {
            scale,
            size: Size::new(canvas.width * scale, canvas.height * scale),
            indicator: Point::ZERO,
            edge_threshold: edge_threshold.max(0.0),
        };
        minimap.place(Point::new(canvas.width / 2.0, canvas.height / 2.0));
        Some(minimap)
    }

    /// Minimap units per canvas unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Minimap size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Indicator position in minimap coordinates.
    #[must_use]
    pub fn indicator(&self) -> Point {
        self.indicator
    }

    /// The region the indicator is confined to.
    ///
    /// On an axis shorter than twice the threshold the region collapses to the
    /// axis midpoint.
    #[must_use]
    pub fn indicator_bounds(&self) -> Rect {
        let (x0, x1) = axis_bounds(self.size.width, self.edge_threshold);
        let (y0, y1) = axis_bounds(self.size.height, self.edge_threshold);
        Rect::new(x0, y0, x1, y1)
    }

    /// Moves the indicator to the minimap image of a canvas-space point, clamped.
    pub fn place(&mut self, canvas_point: Point) {
        let bounds = self.indicator_bounds();
        let x = clamp_axis(canvas_point.x * self.scale, bounds.x0, bounds.x1);
        let y = clamp_axis(canvas_point.y * self.scale, bounds.y0, bounds.y1);
        self.indicator = Point::new(x, y);
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn axis_bounds(extent: f64, threshold: f64) -> (f64, f64) {
    let lo = threshold;
    let hi = extent - threshold;
    if lo > hi {
        let mid = extent / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    v.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::Minimap;

    #[test]
    fn wide_canvas_maps_width_to_target() {
        let map = Minimap::for_canvas(Size::new(2000.0, 1000.0), 200.0, 8.0).unwrap();
        assert!((map.scale() - 0.1).abs() < 1e-12);
        assert_eq!(map.size(), Size::new(200.0, 100.0));
        assert_eq!(map.indicator(), Point::new(100.0, 50.0));
        assert_eq!(map.indicator_bounds(), Rect::new(8.0, 8.0, 192.0, 92.0));
    }

    #[test]
    fn tall_canvas_maps_height_to_target() {
        let map = Minimap::for_canvas(Size::new(500.0, 4000.0), 200.0, 8.0).unwrap();
        assert!((map.scale() - 0.05).abs() < 1e-12);
        assert_eq!(map.size(), Size::new(25.0, 200.0));
    }

    #[test]
    fn placement_is_clamped() {
        let mut map = Minimap::for_canvas(Size::new(2000.0, 1000.0), 200.0, 8.0).unwrap();
        map.place(Point::new(-5000.0, 99_999.0));
        assert_eq!(map.indicator(), Point::new(8.0, 92.0));
        map.place(Point::new(f64::NAN, 10.0));
        assert_eq!(map.indicator(), Point::new(8.0, 8.0));
    }

    #[test]
    fn thin_axis_collapses_to_midpoint() {
        let map = Minimap::for_canvas(Size::new(10_000.0, 50.0), 200.0, 8.0).unwrap();
        // Height is 1.0 on the minimap, less than twice the threshold.
        assert_eq!(map.indicator_bounds().y0, 0.5);
        assert_eq!(map.indicator_bounds().y1, 0.5);
        assert_eq!(map.indicator().y, 0.5);
    }

    #[test]
    fn degenerate_canvas_is_rejected() {
        assert!(Minimap::for_canvas(Size::new(0.0, 10.0), 200.0, 8.0).is_none());
        assert!(Minimap::for_canvas(Size::new(10.0, -1.0), 200.0, 8.0).is_none());
        assert!(Minimap::for_canvas(Size::new(f64::INFINITY, 10.0), 200.0, 8.0).is_none());
    }
}
