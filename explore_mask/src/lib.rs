// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=explore_mask --heading-base-level=0

//! Explore Mask: cheap placeholders for off-screen cards.
//!
//! A large canvas of live examples is expensive to keep rendered. This crate
//! decides, per card, whether the card is visible through the viewport and
//! what to render when it is not:
//!
//! - [`IntersectionEntry`]: intersection of a card with the viewport root,
//!   with an optional root margin.
//! - [`MaskThreshold`]: the policy deciding which ratios count as masked.
//! - [`VisibilityMask`]: per-card state; measures once, then flips between
//!   [`MaskView::Content`] and [`MaskView::Placeholder`].
//! - [`IntersectionObserver`]: batch observer with scoped [`Observation`]
//!   registrations, reporting only cards whose state changed.
//!
//! Hosts own the cards, measure them after first layout, call
//! [`IntersectionObserver::tick`] when the viewport moves, and feed the
//! reported entries to each card's mask.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use explore_mask::{IntersectionObserver, MaskConfig, MaskView, VisibilityMask};
//!
//! let observer = IntersectionObserver::new(MaskConfig::default());
//! let mut mask = VisibilityMask::new();
//! mask.measure_once(|| Size::new(700.0, 200.0));
//! let _guard = observer.observe("button/primary", Rect::new(5000.0, 0.0, 5700.0, 200.0));
//!
//! let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
//! for (_key, entry) in observer.tick(viewport, |r| r) {
//!     mask.observe(&entry, observer.config().threshold);
//! }
//! assert_eq!(mask.view(), MaskView::Placeholder { size: Size::new(700.0, 200.0) });
//! ```
//!
//! Observations are asynchronous by nature: mask state reflects the last
//! tick, not the current geometry.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod intersection;
mod mask;
mod observer;
mod policy;

pub use intersection::IntersectionEntry;
pub use mask::{MaskView, Overlay, VisibilityMask};
pub use observer::{IntersectionObserver, Observation};
pub use policy::{MaskConfig, MaskThreshold};
