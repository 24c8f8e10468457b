// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use crate::config::{ConfigError, FitPolicy, MIN_SCALE_FLOOR, ViewportConfig};
use crate::minimap::Minimap;

/// Which control asked for a zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomSource {
    /// Modified wheel scroll, anchored at the pointer.
    Wheel,
    /// Zoom-in button or keyboard shortcut.
    ZoomIn,
    /// Zoom-out button or keyboard shortcut.
    ZoomOut,
}

/// A viewport transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// The canvas content was measured (first layout or a later re-measure).
    Initialise {
        /// Measured canvas size.
        canvas: Size,
    },
    /// The viewport itself changed size.
    Resize {
        /// New viewport size.
        viewport: Size,
    },
    /// The canvas was dragged; `offset` is the total drag since mount in
    /// viewport pixels.
    Pan {
        /// Absolute pan offset.
        offset: Vec2,
    },
    /// Zoom to `scale` keeping `anchor` (viewport coordinates) fixed.
    Zoom {
        /// Control that requested the zoom.
        source: ZoomSource,
        /// Requested scale, clamped into the zoom limits.
        scale: f64,
        /// Viewport point that stays fixed.
        anchor: Point,
    },
    /// Return to the reset scale with the canvas centered.
    Reset,
}

/// Pan/zoom state of the Explore canvas.
///
/// The state is unready until the first [`Action::Initialise`]; until then
/// every transition except [`Action::Resize`] is ignored.
///
/// Pan is stored as an offset from the *rest position*: the position at which
/// the canvas center sits under the focal anchor (the viewport center) for the
/// current scale. The absolute pan is derived from it on demand, so every
/// scale change recomputes pan from scale and focal point.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    config: ViewportConfig,
    viewport: Size,
    canvas: Size,
    scale: f64,
    initial_scale: f64,
    min_scale: f64,
    max_scale: f64,
    offset: Vec2,
    focal_anchor: Point,
    focal_offset: Point,
    minimap: Option<Minimap>,
}

impl ViewportState {
    /// Creates an unready state for a viewport of the given size.
    pub fn new(viewport: Size, config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = sanitize_size(viewport).unwrap_or(Size::ZERO);
        Ok(Self {
            config,
            viewport,
            canvas: Size::ZERO,
            scale: 1.0,
            initial_scale: 1.0,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            offset: Vec2::ZERO,
            focal_anchor: center(viewport),
            focal_offset: Point::ZERO,
            minimap: None,
        })
    }

    /// Applies a transition. Returns `true` if the state changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Initialise { canvas } => self.initialise(canvas),
            Action::Resize { viewport } => self.resize(viewport),
            Action::Pan { offset } => self.pan_to(offset),
            Action::Zoom {
                source,
                scale,
                anchor,
            } => self.zoom(source, scale, anchor),
            Action::Reset => self.reset(),
        }
    }

    /// Returns `true` once the canvas has been measured.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.minimap.is_some()
    }

    /// Configuration this state was built with.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale restored by [`Action::Reset`].
    #[must_use]
    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    /// Current lower zoom limit. Under [`FitPolicy::Fit`] this follows the fit scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Upper zoom limit.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Measured canvas size, zero while unready.
    #[must_use]
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Viewport point that stays fixed during button zooms (the viewport center).
    #[must_use]
    pub fn focal_anchor(&self) -> Point {
        self.focal_anchor
    }

    /// Canvas point that sits under the focal anchor at rest (the canvas center).
    #[must_use]
    pub fn focal_offset(&self) -> Point {
        self.focal_offset
    }

    /// Absolute pan offset since mount, in viewport pixels.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Translation of the canvas origin relative to the viewport origin.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.rest_pan(self.scale) + self.offset
    }

    /// Canvas point currently under the focal anchor.
    #[must_use]
    pub fn focal_canvas_point(&self) -> Point {
        self.focal_offset - self.offset / self.scale
    }

    /// The minimap, once the canvas has been measured.
    #[must_use]
    pub fn minimap(&self) -> Option<&Minimap> {
        self.minimap.as_ref()
    }

    fn initialise(&mut self, canvas: Size) -> bool {
        let Some(canvas) = sanitize_size(canvas) else {
            return false;
        };
        let Some(minimap) = Minimap::for_canvas(
            canvas,
            self.config.minimap_target,
            self.config.edge_threshold,
        ) else {
            return false;
        };

        let was_ready = self.is_ready();
        let pan = self.pan();
        self.canvas = canvas;
        self.focal_offset = center(canvas);
        self.focal_anchor = center(self.viewport);
        self.minimap = Some(minimap);

        if was_ready {
            // Re-measure: keep the on-screen transform.
            self.offset = pan - self.rest_pan(self.scale);
            if self.config.fit == FitPolicy::Fit {
                self.refit_limits();
            }
            self.enforce_limits();
        } else {
            match self.config.fit {
                FitPolicy::Fit => self.refit_limits(),
                FitPolicy::Actual => {
                    self.initial_scale = 1.0_f64.max(self.min_scale).min(self.max_scale);
                }
            }
            self.scale = self.initial_scale;
            self.offset = Vec2::ZERO;
        }
        self.sync_indicator();
        true
    }

    fn resize(&mut self, viewport: Size) -> bool {
        let Some(viewport) = sanitize_size(viewport) else {
            return false;
        };
        if viewport == self.viewport {
            return false;
        }
        let pan = self.pan();
        self.viewport = viewport;
        self.focal_anchor = center(viewport);
        if !self.is_ready() {
            return true;
        }
        self.offset = pan - self.rest_pan(self.scale);
        if self.config.fit == FitPolicy::Fit {
            self.refit_limits();
        }
        self.enforce_limits();
        self.sync_indicator();
        true
    }

    fn pan_to(&mut self, offset: Vec2) -> bool {
        if !self.is_ready() || !offset.is_finite() || offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.sync_indicator();
        true
    }

    fn zoom(&mut self, source: ZoomSource, scale: f64, anchor: Point) -> bool {
        if !self.is_ready() || !anchor.is_finite() {
            return false;
        }
        let Some(target) = self.clamp_scale(scale) else {
            return false;
        };
        if (target - self.scale).abs() < f64::EPSILON {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(?source, from = self.scale, to = target, "zoom");
        #[cfg(not(feature = "tracing"))]
        let _ = source;
        self.zoom_about(target, anchor);
        true
    }

    fn reset(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let changed = self.scale != self.initial_scale || self.offset != Vec2::ZERO;
        self.scale = self.initial_scale;
        self.offset = Vec2::ZERO;
        self.sync_indicator();
        changed
    }

    fn zoom_about(&mut self, target: f64, anchor: Point) {
        let pan = self.pan();
        let canvas_point = (anchor.to_vec2() - pan) / self.scale;
        let new_pan = anchor.to_vec2() - canvas_point * target;
        self.scale = target;
        self.offset = new_pan - self.rest_pan(target);
        self.sync_indicator();
    }

    fn rest_pan(&self, scale: f64) -> Vec2 {
        self.focal_anchor.to_vec2() - self.focal_offset.to_vec2() * scale
    }

    fn clamp_scale(&self, scale: f64) -> Option<f64> {
        if scale.is_nan() {
            return None;
        }
        Some(scale.max(self.min_scale).min(self.max_scale))
    }

    /// Makes the fit scale both the zoom floor and the reset target.
    fn refit_limits(&mut self) {
        let (view, canvas) = (self.viewport, self.canvas);
        if !has_area(view) || !has_area(canvas) {
            return;
        }
        let fit = (view.width / canvas.width).min(view.height / canvas.height);
        let fit = fit.max(MIN_SCALE_FLOOR).min(self.max_scale);
        self.min_scale = fit;
        self.initial_scale = fit;
    }

    fn enforce_limits(&mut self) {
        if let Some(target) = self.clamp_scale(self.scale)
            && target != self.scale
        {
            self.zoom_about(target, self.focal_anchor);
        }
    }

    fn sync_indicator(&mut self) {
        let point = self.focal_canvas_point();
        if let Some(minimap) = self.minimap.as_mut() {
            minimap.place(point);
        }
    }
}

fn center(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 2.0)
}

fn sanitize_size(size: Size) -> Option<Size> {
    if size.is_finite() && size.width >= 0.0 && size.height >= 0.0 {
        Some(size)
    } else {
        None
    }
}

fn has_area(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0
}
