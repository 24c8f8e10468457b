// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=explore_page --heading-base-level=0

//! Explore Page: a headless canvas of component examples.
//!
//! This crate wires the pieces of the Explore page together:
//! - [`CardRegistry`]: the explicit list of components and examples, laid out
//!   on a canvas grid by [`CardRegistry::layout`].
//! - [`ExplorePage`]: mounts a [`explore_viewport::PanZoomEngine`], owns the
//!   [`explore_viewport::ViewportController`], and masks every card through an
//!   [`explore_mask::IntersectionObserver`].
//! - [`ListenerSet`]: the host listener table; each mount holds scoped
//!   [`Subscription`]s that are released on unmount.
//!
//! Hosts translate their input into [`PageEvent`]s. A wheel event answered
//! with [`EventOutcome::Native`] must be passed on to the engine untouched.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use explore_page::{
//!     CardRegistry, EventOutcome, ExampleCard, ExplorePage, ListenerSet, PageConfig, PageEvent,
//! };
//! use explore_viewport::CanvasEngine;
//!
//! let registry = CardRegistry::new()
//!     .with_component("Button", [ExampleCard::new("primary", 80.0)])
//!     .with_component("Checkbox", [ExampleCard::new("checked", 40.0)]);
//! let view = Size::new(1280.0, 720.0);
//! let mut page = ExplorePage::new(registry, view, PageConfig::default()).unwrap();
//! let listeners = ListenerSet::new();
//!
//! // Nothing renders until the theme is ready.
//! assert!(page.loader_visible());
//! page.set_theme_ready(true);
//!
//! let engine = CanvasEngine::new(Rect::from_origin_size(Point::ZERO, view));
//! page.mount(engine, &listeners).unwrap();
//! assert_eq!(listeners.len(), 4);
//! assert_eq!(page.zoom_label(), "100%");
//!
//! assert_eq!(page.handle(PageEvent::ZoomIn), EventOutcome::Handled);
//! assert_eq!(page.zoom_label(), "135%");
//!
//! page.unmount();
//! assert!(listeners.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod listeners;
mod page;
mod registry;

pub use listeners::{ListenerKind, ListenerSet, Subscription};
pub use page::{EventOutcome, ExplorePage, MountError, PageConfig, PageEvent};
pub use registry::{
    CanvasLayout, CardId, CardRegistry, ComponentEntry, ExampleCard, GridMetrics, PlacedCard,
};
