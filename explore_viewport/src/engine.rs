// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// The pan/zoom engine that actually moves the canvas on screen.
///
/// The controller decides *what* the transform should be; the engine applies
/// it and answers geometric queries about the current transform. A DOM host
/// wraps its pan/zoom library here, and [`CanvasEngine`] is a headless
/// implementation used by tests and non-DOM hosts.
pub trait PanZoomEngine {
    /// Current uniform scale.
    fn scale(&self) -> f64;

    /// Current translation of the canvas origin relative to the viewport origin.
    fn pan(&self) -> Vec2;

    /// Sets an absolute transform.
    fn set_transform(&mut self, scale: f64, pan: Vec2);

    /// The viewport rectangle in device coordinates; this is the root that
    /// card visibility is measured against.
    fn view_rect(&self) -> Rect;

    /// Maps a canvas-space rectangle into viewport coordinates.
    fn canvas_to_view_rect(&self, rect: Rect) -> Rect;

    /// Follows a viewport resize. The viewport origin is kept.
    fn set_view_size(&mut self, _size: Size) {}

    /// Releases engine resources. Called once when the controller unmounts.
    fn dispose(&mut self) {}
}

/// Headless [`PanZoomEngine`] over a rectangular viewport.
///
/// `CanvasEngine` keeps a uniform scale + pan transform from canvas space
/// into the viewport and its inverse.
#[derive(Clone, Debug)]
pub struct CanvasEngine {
    view_rect: Rect,
    scale: f64,
    pan: Vec2,
    disposed: bool,
    canvas_to_view: Affine,
    view_to_canvas: Affine,
}

impl CanvasEngine {
    /// Creates an engine covering `view_rect` at scale `1.0` and zero pan.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let mut engine = Self {
            view_rect,
            scale: 1.0,
            pan: Vec2::ZERO,
            disposed: false,
            canvas_to_view: Affine::IDENTITY,
            view_to_canvas: Affine::IDENTITY,
        };
        engine.rebuild_transforms();
        engine
    }

    /// Sets the viewport rectangle. Scale and pan are kept.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
    }

    /// Returns `true` once [`PanZoomEngine::dispose`] has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Converts a canvas-space point into viewport coordinates.
    #[must_use]
    pub fn canvas_to_view_point(&self, pt: Point) -> Point {
        self.canvas_to_view * pt
    }

    /// Converts a viewport point into canvas coordinates.
    #[must_use]
    pub fn view_to_canvas_point(&self, pt: Point) -> Point {
        self.view_to_canvas * pt
    }

    /// Returns the canvas-space rectangle currently visible through the viewport.
    #[must_use]
    pub fn visible_canvas_rect(&self) -> Rect {
        map_rect(self.view_to_canvas, self.view_rect)
    }

    fn rebuild_transforms(&mut self) {
        let view_origin = self.view_rect.origin().to_vec2();
        // Canvas → view: scale, then translate by pan, then into the view rect.
        self.canvas_to_view = Affine::translate(view_origin + self.pan) * Affine::scale(self.scale);
        self.view_to_canvas = self.canvas_to_view.inverse();
    }
}

impl PanZoomEngine for CanvasEngine {
    fn scale(&self) -> f64 {
        self.scale
    }

    fn pan(&self) -> Vec2 {
        self.pan
    }

    fn set_transform(&mut self, scale: f64, pan: Vec2) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.scale = scale;
        self.pan = pan;
        self.rebuild_transforms();
    }

    fn view_rect(&self) -> Rect {
        self.view_rect
    }

    fn canvas_to_view_rect(&self, rect: Rect) -> Rect {
        map_rect(self.canvas_to_view, rect)
    }

    fn set_view_size(&mut self, size: Size) {
        self.set_view_rect(Rect::from_origin_size(self.view_rect.origin(), size));
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

// Bounding box of the four transformed corners; exact for axis-aligned uniform scale.
fn map_rect(transform: Affine, rect: Rect) -> Rect {
    let q0 = transform * Point::new(rect.x0, rect.y0);
    let q1 = transform * Point::new(rect.x1, rect.y0);
    let q2 = transform * Point::new(rect.x0, rect.y1);
    let q3 = transform * Point::new(rect.x1, rect.y1);
    let min_x = q0.x.min(q1.x).min(q2.x).min(q3.x);
    let min_y = q0.y.min(q1.y).min(q2.y).min(q3.y);
    let max_x = q0.x.max(q1.x).max(q2.x).max(q3.x);
    let max_y = q0.y.max(q1.y).max(q2.y).max(q3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}
