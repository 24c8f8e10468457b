// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use explore_event_state::modifiers::{Modifiers, Platform};
use explore_event_state::pan::PanTracker;
use explore_event_state::wheel::WheelInput;
use explore_mask::{
    IntersectionObserver, MaskConfig, MaskView, Observation, Overlay, VisibilityMask,
};
use explore_viewport::{ConfigError, Minimap, PanZoomEngine, ViewportConfig, ViewportController};
use kurbo::{Point, Size, Vec2};

use crate::listeners::{ListenerKind, ListenerSet, Subscription};
use crate::registry::{CanvasLayout, CardRegistry, GridMetrics, PlacedCard};

/// Settings for an [`ExplorePage`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageConfig {
    /// Viewport and minimap settings.
    pub viewport: ViewportConfig,
    /// Card masking settings.
    pub mask: MaskConfig,
    /// Canvas grid spacing.
    pub grid: GridMetrics,
    /// Platform, for the zoom modifier.
    pub platform: Platform,
}

/// Input delivered to the page by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageEvent<'a> {
    /// Wheel over the canvas.
    Wheel(WheelInput),
    /// Pointer pressed on the canvas.
    PointerDown(Point),
    /// Pointer moved.
    PointerMove(Point),
    /// Pointer released.
    PointerUp,
    /// The pan/zoom engine finished a pan; `offset` is absolute since mount.
    PanEnd {
        /// Absolute pan offset.
        offset: Vec2,
    },
    /// Key pressed anywhere in the window.
    Key {
        /// Logical key value.
        key: &'a str,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// Zoom-in button activated.
    ZoomIn,
    /// Zoom-out button activated.
    ZoomOut,
    /// Reset button activated.
    Reset,
    /// Window resized.
    Resize(Size),
    /// The intersection collaborator's scheduled callback.
    IntersectionTick,
}

/// What the page did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The page consumed the event.
    Handled,
    /// The event must reach the engine's native handling (unmodified wheel).
    Native,
    /// Nothing happened: not mounted, or the event changed nothing.
    Ignored,
}

/// Why [`ExplorePage::mount`] refused to mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountError {
    /// The theme is not ready or rendering has not been started.
    NotRendering,
    /// The canvas content has no usable size yet.
    UnmeasuredCanvas,
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRendering => f.write_str("explore page is not rendering yet"),
            Self::UnmeasuredCanvas => f.write_str("explore canvas has not been laid out"),
        }
    }
}

impl core::error::Error for MountError {}

// Listeners held for one mount; dropping the session unregisters them all.
#[derive(Debug)]
struct Session {
    _wheel: Subscription,
    _pan_end: Subscription,
    _resize: Subscription,
    _key_down: Subscription,
}

impl Session {
    fn acquire(listeners: &ListenerSet) -> Self {
        Self {
            _wheel: listeners.add(ListenerKind::Wheel),
            _pan_end: listeners.add(ListenerKind::PanEnd),
            _resize: listeners.add(ListenerKind::Resize),
            _key_down: listeners.add(ListenerKind::KeyDown),
        }
    }
}

#[derive(Debug)]
struct CardSlot {
    placed: PlacedCard,
    mask: VisibilityMask,
    observation: Option<Observation<usize>>,
}

/// The Explore page: a pannable, zoomable canvas of example cards.
///
/// The page renders only once the theme is ready and rendering has been
/// started; until then a loader is shown and [`ExplorePage::mount`] refuses.
/// A mount acquires the pan/zoom engine, the host listeners, and one
/// intersection registration per card; all of them are released by
/// [`ExplorePage::unmount`], by turning the render gate off, and on drop.
#[derive(Debug)]
pub struct ExplorePage<E: PanZoomEngine> {
    config: PageConfig,
    registry: CardRegistry,
    layout: CanvasLayout,
    controller: ViewportController<E>,
    observer: IntersectionObserver<usize>,
    cards: Vec<CardSlot>,
    pan: PanTracker,
    session: Option<Session>,
    theme_ready: bool,
    start_rendering: bool,
}

impl<E: PanZoomEngine> ExplorePage<E> {
    /// Creates an unmounted page for `registry` in a viewport of the given size.
    pub fn new(
        registry: CardRegistry,
        viewport: Size,
        config: PageConfig,
    ) -> Result<Self, ConfigError> {
        let layout = registry.layout(&config.grid);
        Ok(Self {
            controller: ViewportController::new(viewport, config.viewport)?,
            observer: IntersectionObserver::new(config.mask),
            cards: Vec::new(),
            pan: PanTracker::default(),
            session: None,
            theme_ready: false,
            start_rendering: true,
            config,
            registry,
            layout,
        })
    }

    /// The card registry.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// The canvas layout computed from the registry.
    #[must_use]
    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    /// The viewport controller.
    #[must_use]
    pub fn controller(&self) -> &ViewportController<E> {
        &self.controller
    }

    /// The minimap, while mounted.
    #[must_use]
    pub fn minimap(&self) -> Option<&Minimap> {
        self.controller.state().minimap()
    }

    /// Returns `true` while mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` when both the theme and the render gate allow rendering.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.theme_ready && self.start_rendering
    }

    /// The loader covers the page until it is rendering.
    #[must_use]
    pub fn loader_visible(&self) -> bool {
        !self.is_rendering()
    }

    /// Marks the theme as ready (or not). Losing the theme unmounts.
    pub fn set_theme_ready(&mut self, ready: bool) -> Option<E> {
        self.theme_ready = ready;
        if self.is_rendering() { None } else { self.unmount() }
    }

    /// Opens or closes the render gate. Closing it unmounts.
    pub fn set_start_rendering(&mut self, start: bool) -> Option<E> {
        self.start_rendering = start;
        if self.is_rendering() { None } else { self.unmount() }
    }

    /// Mounts the page: attaches `engine`, registers listeners on `listeners`,
    /// initialises the viewport from the laid-out canvas, measures and observes
    /// every card, and runs a first intersection pass.
    ///
    /// On error nothing stays acquired: the engine is disposed and dropped,
    /// and every listener registered so far is removed.
    pub fn mount(&mut self, engine: E, listeners: &ListenerSet) -> Result<(), MountError> {
        self.unmount();
        if !self.is_rendering() {
            return Err(MountError::NotRendering);
        }
        let session = Session::acquire(listeners);
        if !self.controller.mount(engine, self.layout.size) {
            self.controller.unmount();
            #[cfg(feature = "tracing")]
            tracing::debug!("explore mount aborted: canvas not measured");
            return Err(MountError::UnmeasuredCanvas);
        }

        self.cards = self
            .layout
            .cards
            .iter()
            .enumerate()
            .map(|(index, placed)| {
                let mut mask = VisibilityMask::new();
                mask.measure_once(|| placed.bounds.size());
                CardSlot {
                    placed: *placed,
                    mask,
                    observation: Some(self.observer.observe(index, placed.bounds)),
                }
            })
            .collect();
        self.pan.reset();
        self.session = Some(session);
        #[cfg(feature = "tracing")]
        tracing::debug!(cards = self.cards.len(), "explore mounted");
        self.tick_intersections();
        Ok(())
    }

    /// Releases everything acquired by [`ExplorePage::mount`] and returns the
    /// disposed engine.
    pub fn unmount(&mut self) -> Option<E> {
        self.session = None;
        self.cards.clear();
        self.observer.disconnect();
        self.pan.reset();
        let engine = self.controller.unmount();
        #[cfg(feature = "tracing")]
        if engine.is_some() {
            tracing::debug!("explore unmounted");
        }
        engine
    }

    /// Handles one host event. At most one viewport transition is applied.
    pub fn handle(&mut self, event: PageEvent<'_>) -> EventOutcome {
        if !self.is_mounted() {
            return EventOutcome::Ignored;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(?event, "explore event");
        let platform = self.config.platform;
        let handled = match event {
            PageEvent::Wheel(input) => {
                if !input.modifiers.has_command(platform) {
                    return EventOutcome::Native;
                }
                let zoomed = self.controller.wheel(&input, platform);
                self.sync_pan();
                zoomed
            }
            PageEvent::PointerDown(pos) => {
                self.pan.start(pos);
                false
            }
            PageEvent::PointerMove(pos) => match self.pan.update(pos) {
                Some(offset) => self.controller.pan_to(offset),
                None => false,
            },
            PageEvent::PointerUp => {
                self.pan.end();
                false
            }
            PageEvent::PanEnd { offset } => {
                self.pan.set_offset(offset);
                self.controller.pan_to(offset)
            }
            PageEvent::Key { key, modifiers } => {
                let matched = self.controller.key(key, modifiers, platform).is_some();
                self.sync_pan();
                matched
            }
            PageEvent::ZoomIn => {
                let zoomed = self.controller.zoom_in();
                self.sync_pan();
                zoomed
            }
            PageEvent::ZoomOut => {
                let zoomed = self.controller.zoom_out();
                self.sync_pan();
                zoomed
            }
            PageEvent::Reset => {
                let reset = self.controller.reset();
                self.sync_pan();
                reset
            }
            PageEvent::Resize(size) => {
                let resized = self.controller.resize(size);
                self.sync_pan();
                resized
            }
            PageEvent::IntersectionTick => self.tick_intersections() > 0,
        };
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    /// Runs one intersection pass and updates card masks.
    ///
    /// Returns the number of cards whose mask toggled.
    pub fn tick_intersections(&mut self) -> usize {
        let Some(engine) = self.controller.engine() else {
            return 0;
        };
        let entries = self
            .observer
            .tick(engine.view_rect(), |rect| engine.canvas_to_view_rect(rect));
        let threshold = self.config.mask.threshold;
        let mut toggled = 0;
        for (index, entry) in entries {
            if let Some(slot) = self.cards.get_mut(index)
                && slot.mask.observe(&entry, threshold)
            {
                toggled += 1;
            }
        }
        toggled
    }

    /// Zoom percentage shown in the control panel, e.g. `"135%"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        let percent = self.controller.state().scale() * 100.0 + 0.5;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Scale is clamped to a small positive range, so the percentage fits in u32"
        )]
        let percent = percent as u32;
        alloc::format!("{percent}%")
    }

    /// Number of cards currently masked.
    #[must_use]
    pub fn masked_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|slot| slot.mask.is_masked())
            .count()
    }

    /// What card `index` (in layout order) should render, while mounted.
    #[must_use]
    pub fn card_view(&self, index: usize) -> Option<(PlacedCard, MaskView, Overlay)> {
        let slot = self.cards.get(index)?;
        Some((slot.placed, slot.mask.view(), slot.mask.overlay()))
    }

    /// Number of intersection registrations currently live.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|slot| slot.observation.as_ref().is_some_and(Observation::is_live))
            .count()
    }

    // Zooms, resets, and resizes move the rest position; keep drag offsets in step.
    fn sync_pan(&mut self) {
        let offset = self.controller.state().offset();
        if self.pan.offset() != offset && !self.pan.is_dragging() {
            self.pan.set_offset(offset);
        }
    }
}
