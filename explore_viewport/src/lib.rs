// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=explore_viewport --heading-base-level=0

//! Explore Viewport: pan/zoom state for a large virtual canvas, with a minimap.
//!
//! This crate provides a small, headless model of the Explore page's camera:
//! - [`ViewportState`]: scale, pan, and the derived [`Minimap`], changed only
//!   through [`Action`] transitions.
//! - [`ViewportController`]: owns one state, drives a [`PanZoomEngine`], and
//!   maps buttons, wheel events, and keyboard shortcuts onto transitions.
//! - [`CanvasEngine`]: a headless engine for tests and non-DOM hosts.
//!
//! It does **not** render anything. Callers are expected to:
//! - Measure the canvas content after layout and mount the controller.
//! - Forward wheel, key, resize, and pan-end events.
//! - Draw the minimap from [`Minimap::size`] and [`Minimap::indicator`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use explore_viewport::{CanvasEngine, ViewportConfig, ViewportController};
//!
//! let view = Size::new(1280.0, 720.0);
//! let mut controller = ViewportController::new(view, ViewportConfig::default()).unwrap();
//! let engine = CanvasEngine::new(Rect::from_origin_size(Point::ZERO, view));
//!
//! // The canvas content measured 2000x1000 after layout.
//! controller.mount(engine, Size::new(2000.0, 1000.0));
//!
//! let minimap = controller.state().minimap().unwrap();
//! assert_eq!(minimap.size(), Size::new(200.0, 100.0));
//! assert_eq!(minimap.indicator(), Point::new(100.0, 50.0));
//!
//! controller.zoom_in();
//! assert!(controller.state().scale() > 1.0);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform; there is no rotation.
//! - Pan positions arrive as the absolute offset dragged since mount, never
//!   as per-event deltas.
//! - Every zoom keeps its anchor fixed on screen; button and keyboard zooms
//!   anchor at the viewport center, wheel zooms at the pointer.
//! - Invalid input (unmounted engine, NaN scale, unmeasured canvas) is ignored
//!   rather than reported.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod controller;
mod engine;
mod minimap;
mod state;

pub use config::{
    ConfigError, DEFAULT_WHEEL_FACTOR, DEFAULT_ZOOM_FACTOR, FitPolicy, MIN_SCALE_FLOOR,
    ViewportConfig,
};
pub use controller::ViewportController;
pub use engine::{CanvasEngine, PanZoomEngine};
pub use minimap::Minimap;
pub use state::{Action, ViewportState, ZoomSource};
