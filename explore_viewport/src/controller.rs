// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use explore_event_state::modifiers::{Modifiers, Platform};
use explore_event_state::shortcut::{ZoomShortcut, match_shortcut};
use explore_event_state::wheel::{WheelInput, WheelIntent, classify_wheel};
use kurbo::{Size, Vec2};

use crate::config::{ConfigError, ViewportConfig};
use crate::engine::PanZoomEngine;
use crate::state::{Action, ViewportState, ZoomSource};

/// Owns the [`ViewportState`] of one Explore page and drives its pan/zoom engine.
///
/// The engine is attached by [`ViewportController::mount`] and released by
/// [`ViewportController::unmount`] or when the controller is dropped. While no
/// engine is mounted every gesture is ignored.
#[derive(Debug)]
pub struct ViewportController<E: PanZoomEngine> {
    state: ViewportState,
    engine: Option<E>,
}

impl<E: PanZoomEngine> ViewportController<E> {
    /// Creates an unmounted controller for a viewport of the given size.
    pub fn new(viewport: Size, config: ViewportConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: ViewportState::new(viewport, config)?,
            engine: None,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The mounted engine, if any.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Returns `true` while an engine is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    /// Attaches the engine and initialises from the measured canvas size.
    ///
    /// An engine that was already mounted is disposed first. The viewport
    /// takes the size of the engine's view rect, since resizes that happened
    /// while unmounted were never dispatched. Returns `false` if the canvas
    /// measurement is unusable; the engine stays mounted so a later
    /// [`ViewportController::remeasure`] can still initialise.
    pub fn mount(&mut self, engine: E, canvas: Size) -> bool {
        self.unmount();
        self.state.apply(Action::Resize {
            viewport: engine.view_rect().size(),
        });
        self.engine = Some(engine);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            "viewport mounted"
        );
        self.dispatch(Action::Initialise { canvas })
    }

    /// Detaches and disposes the engine, returning it.
    ///
    /// The state returns to unready; the viewport size and configuration are kept.
    pub fn unmount(&mut self) -> Option<E> {
        let mut engine = self.engine.take()?;
        engine.dispose();
        let viewport = self.state.viewport();
        let config = *self.state.config();
        // The configuration was validated when this controller was built.
        if let Ok(state) = ViewportState::new(viewport, config) {
            self.state = state;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("viewport unmounted");
        Some(engine)
    }

    /// Applies one transition and pushes the resulting transform to the engine.
    ///
    /// Returns `true` if the state changed. Without a mounted engine this is a no-op.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            #[cfg(feature = "tracing")]
            tracing::trace!(?action, "ignored: no engine mounted");
            return false;
        };
        let changed = self.state.apply(action);
        if changed && self.state.is_ready() {
            engine.set_transform(self.state.scale(), self.state.pan());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?action, changed, scale = self.state.scale(), "viewport transition");
        changed
    }

    /// Zooms in by one step about the focal anchor.
    pub fn zoom_in(&mut self) -> bool {
        let scale = self.state.scale() * self.state.config().zoom_factor;
        self.zoom_step(ZoomSource::ZoomIn, scale)
    }

    /// Zooms out by one step about the focal anchor.
    pub fn zoom_out(&mut self) -> bool {
        let scale = self.state.scale() / self.state.config().zoom_factor;
        self.zoom_step(ZoomSource::ZoomOut, scale)
    }

    /// Restores the reset scale with the canvas centered.
    pub fn reset(&mut self) -> bool {
        self.dispatch(Action::Reset)
    }

    /// Records the absolute pan offset reported by the engine or a pan tracker.
    pub fn pan_to(&mut self, offset: Vec2) -> bool {
        self.dispatch(Action::Pan { offset })
    }

    /// Handles the viewport changing size.
    pub fn resize(&mut self, viewport: Size) -> bool {
        let changed = self.dispatch(Action::Resize { viewport });
        if changed && let Some(engine) = self.engine.as_mut() {
            engine.set_view_size(self.state.viewport());
        }
        changed
    }

    /// Handles the canvas content being measured again.
    pub fn remeasure(&mut self, canvas: Size) -> bool {
        self.dispatch(Action::Initialise { canvas })
    }

    /// Handles a wheel event.
    ///
    /// Returns `true` only if the event zoomed the viewport; `false` means the
    /// event must be left to the engine's native panning.
    pub fn wheel(&mut self, input: &WheelInput, platform: Platform) -> bool {
        match classify_wheel(input, platform, self.state.config().wheel_factor) {
            WheelIntent::Native => false,
            WheelIntent::Zoom { factor, anchor } => self.dispatch(Action::Zoom {
                source: ZoomSource::Wheel,
                scale: self.state.scale() * factor,
                anchor,
            }),
        }
    }

    /// Handles a key press, performing a zoom step for the zoom shortcuts.
    ///
    /// Returns the shortcut that matched, whether or not the scale could still change.
    pub fn key(
        &mut self,
        key: &str,
        modifiers: Modifiers,
        platform: Platform,
    ) -> Option<ZoomShortcut> {
        let shortcut = match_shortcut(key, modifiers, platform)?;
        match shortcut {
            ZoomShortcut::ZoomIn => self.zoom_in(),
            ZoomShortcut::ZoomOut => self.zoom_out(),
        };
        Some(shortcut)
    }

    fn zoom_step(&mut self, source: ZoomSource, scale: f64) -> bool {
        let anchor = self.state.focal_anchor();
        self.dispatch(Action::Zoom {
            source,
            scale,
            anchor,
        })
    }
}

impl<E: PanZoomEngine> Drop for ViewportController<E> {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use explore_event_state::modifiers::{Modifiers, Platform};
    use explore_event_state::shortcut::ZoomShortcut;
    use explore_event_state::wheel::WheelInput;
    use kurbo::{Point, Rect, Size, Vec2};

    use super::ViewportController;
    use crate::config::{DEFAULT_ZOOM_FACTOR, ViewportConfig};
    use crate::engine::{CanvasEngine, PanZoomEngine};

    const VIEW: Size = Size::new(800.0, 600.0);

    fn mounted(canvas: Size) -> ViewportController<CanvasEngine> {
        let mut controller = ViewportController::new(VIEW, ViewportConfig::default()).unwrap();
        let engine = CanvasEngine::new(Rect::from_origin_size(Point::ZERO, VIEW));
        assert!(controller.mount(engine, canvas), "mount should initialise");
        controller
    }

    #[test]
    fn unmounted_controller_ignores_everything() {
        let mut controller =
            ViewportController::<CanvasEngine>::new(VIEW, ViewportConfig::default()).unwrap();
        assert!(!controller.zoom_in());
        assert!(!controller.zoom_out());
        assert!(!controller.reset());
        assert!(!controller.pan_to(Vec2::new(1.0, 1.0)));
        let wheel = WheelInput::new(-1.0, Point::ZERO, Modifiers::CTRL);
        assert!(!controller.wheel(&wheel, Platform::Other));
        assert_eq!(controller.state().scale(), 1.0);
    }

    #[test]
    fn mount_pushes_rest_transform_to_engine() {
        let controller = mounted(Size::new(2000.0, 1000.0));
        let engine = controller.engine().unwrap();
        assert_eq!(engine.scale(), 1.0);
        assert_eq!(engine.pan(), controller.state().pan());
        // Canvas center shows at the viewport center.
        let center = engine.canvas_to_view_point(Point::new(1000.0, 500.0));
        assert_eq!(center, Point::new(400.0, 300.0));
    }

    #[test]
    fn zoom_buttons_step_by_factor() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        assert!(controller.zoom_in());
        assert!((controller.state().scale() - DEFAULT_ZOOM_FACTOR).abs() < 1e-12);
        assert!(controller.zoom_out());
        assert!((controller.state().scale() - 1.0).abs() < 1e-12);
        assert_eq!(
            controller.engine().unwrap().scale(),
            controller.state().scale()
        );
    }

    #[test]
    fn zoom_in_stops_at_max_scale() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        while controller.zoom_in() {}
        assert_eq!(controller.state().scale(), 4.0);
        assert!(!controller.zoom_in());
    }

    #[test]
    fn unmodified_wheel_is_left_to_engine() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        let before = controller.state().clone();
        let wheel = WheelInput::new(-120.0, Point::new(10.0, 10.0), Modifiers::empty());
        assert!(!controller.wheel(&wheel, Platform::Other));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn modified_wheel_zooms_about_pointer() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        let pointer = Point::new(100.0, 100.0);
        let under_pointer = controller
            .engine()
            .unwrap()
            .view_to_canvas_point(pointer);

        let wheel = WheelInput::new(-1.0, pointer, Modifiers::META);
        assert!(controller.wheel(&wheel, Platform::Mac));
        assert!(controller.state().scale() > 1.0);

        let after = controller.engine().unwrap().view_to_canvas_point(pointer);
        assert!((after - under_pointer).hypot() < 1e-9);
    }

    #[test]
    fn keyboard_shortcuts_match_buttons() {
        let mut by_key = mounted(Size::new(2000.0, 1000.0));
        let mut by_button = mounted(Size::new(2000.0, 1000.0));

        assert_eq!(
            by_key.key("+", Modifiers::CTRL, Platform::Other),
            Some(ZoomShortcut::ZoomIn)
        );
        by_button.zoom_in();
        assert_eq!(by_key.state(), by_button.state());

        assert_eq!(by_key.key("+", Modifiers::empty(), Platform::Other), None);
        assert_eq!(
            by_key.key("-", Modifiers::CTRL, Platform::Other),
            Some(ZoomShortcut::ZoomOut)
        );
        by_button.zoom_out();
        assert_eq!(by_key.state(), by_button.state());
    }

    #[test]
    fn unmount_disposes_engine_and_forgets_canvas() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        controller.zoom_in();
        let engine = controller.unmount().unwrap();
        assert!(engine.is_disposed());
        assert!(!controller.is_mounted());
        assert!(!controller.state().is_ready());
        assert_eq!(controller.state().viewport(), VIEW);
        assert!(controller.unmount().is_none());
    }

    #[test]
    fn remount_starts_fresh() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        controller.zoom_in();
        let engine = CanvasEngine::new(Rect::from_origin_size(Point::ZERO, VIEW));
        assert!(controller.mount(engine, Size::new(1000.0, 1000.0)));
        assert_eq!(controller.state().scale(), 1.0);
        assert_eq!(controller.state().canvas(), Size::new(1000.0, 1000.0));
    }

    #[test]
    fn mount_with_unmeasured_canvas_waits_for_remeasure() {
        let mut controller =
            ViewportController::new(VIEW, ViewportConfig::default()).unwrap();
        let engine = CanvasEngine::new(Rect::from_origin_size(Point::ZERO, VIEW));
        assert!(!controller.mount(engine, Size::ZERO));
        assert!(controller.is_mounted());
        assert!(!controller.zoom_in());
        assert!(controller.remeasure(Size::new(2000.0, 1000.0)));
        assert!(controller.zoom_in());
    }

    #[test]
    fn resize_follows_through_to_engine() {
        let mut controller = mounted(Size::new(2000.0, 1000.0));
        assert!(controller.resize(Size::new(1000.0, 500.0)));
        let engine = controller.engine().unwrap();
        assert_eq!(engine.view_rect(), Rect::new(0.0, 0.0, 1000.0, 500.0));
        // The on-screen transform is kept.
        let center = engine.canvas_to_view_point(Point::new(1000.0, 500.0));
        assert_eq!(center, Point::new(400.0, 300.0));
    }

    #[test]
    fn mount_adopts_engine_view_size() {
        let mut controller =
            ViewportController::new(VIEW, ViewportConfig::default()).unwrap();
        // The host window grew while nothing was mounted.
        assert!(!controller.resize(Size::new(1920.0, 1080.0)));
        let engine = CanvasEngine::new(Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert!(controller.mount(engine, Size::new(2000.0, 1000.0)));

        let state = controller.state();
        assert_eq!(state.viewport(), Size::new(1920.0, 1080.0));
        assert_eq!(state.focal_anchor(), Point::new(960.0, 540.0));
        let engine = controller.engine().unwrap();
        let center = engine.canvas_to_view_point(Point::new(1000.0, 500.0));
        assert_eq!(center, Point::new(960.0, 540.0));
    }
}
