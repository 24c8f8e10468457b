// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=explore_event_state --heading-base-level=0

//! Explore Event State: input interpretation for a pan/zoom canvas.
//!
//! This crate turns raw pointer, wheel, and keyboard input into the small set
//! of intents the Explore viewport understands. Each module handles one
//! interaction pattern:
//!
//! - [`pan`]: Track drag gestures as an absolute offset since mount
//! - [`modifiers`]: Modifier key state and the platform's zoom modifier
//! - [`wheel`]: Decide whether a wheel event zooms or falls through to native panning
//! - [`shortcut`]: Recognize the modifier + `+`/`-` keyboard zoom shortcuts
//!
//! ## Design Philosophy
//!
//! Like the other state helpers it is modeled on, every type here is:
//!
//! - **Headless**: no windowing or DOM types, only [`kurbo`] geometry and plain data
//! - **Stateful only where needed**: [`pan::PanTracker`] is the only stateful type
//! - **Explicit about pass-through**: inputs that must reach the host's native
//!   handling are reported as such rather than silently dropped
//!
//! ## Wheel gating
//!
//! ```rust
//! use kurbo::Point;
//! use explore_event_state::modifiers::{Modifiers, Platform};
//! use explore_event_state::wheel::{WheelInput, WheelIntent, classify_wheel};
//!
//! let platform = Platform::from_platform_str("MacIntel");
//! let plain = WheelInput::new(-120.0, Point::new(10.0, 10.0), Modifiers::empty());
//! assert_eq!(classify_wheel(&plain, platform, 1.1), WheelIntent::Native);
//!
//! let zoom = WheelInput::new(-120.0, Point::new(10.0, 10.0), Modifiers::META);
//! assert!(matches!(classify_wheel(&zoom, platform, 1.1), WheelIntent::Zoom { .. }));
//! ```
//!
//! ## Pan tracking
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use explore_event_state::pan::PanTracker;
//!
//! let mut pan = PanTracker::default();
//! pan.start(Point::new(0.0, 0.0));
//! assert_eq!(pan.update(Point::new(30.0, -10.0)), Some(Vec2::new(30.0, -10.0)));
//! pan.end();
//!
//! // A second drag continues from where the first left off.
//! pan.start(Point::new(100.0, 100.0));
//! assert_eq!(pan.update(Point::new(110.0, 100.0)), Some(Vec2::new(40.0, -10.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod modifiers;
pub mod pan;
pub mod shortcut;
pub mod wheel;
