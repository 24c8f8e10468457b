// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel classification: zoom with the command modifier, native panning otherwise.

use kurbo::Point;

use crate::modifiers::{Modifiers, Platform};

/// A wheel event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Vertical wheel delta. Negative values scroll up / away from the user.
    pub delta_y: f64,
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl WheelInput {
    /// Creates a wheel input.
    #[must_use]
    pub fn new(delta_y: f64, position: Point, modifiers: Modifiers) -> Self {
        Self {
            delta_y,
            position,
            modifiers,
        }
    }
}

/// What to do with a wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelIntent {
    /// Leave the event to the native pan/zoom engine. The caller must not consume it.
    Native,
    /// Zoom about `anchor` by multiplying the current scale with `factor`.
    Zoom {
        /// Multiplicative scale change (`> 1` zooms in).
        factor: f64,
        /// Pointer position in viewport coordinates.
        anchor: Point,
    },
}

/// Classifies a wheel event.
///
/// With the platform's command modifier held, scrolling up (negative delta)
/// zooms in by `wheel_factor` and anything else zooms out by the same factor.
/// Without the modifier, and for zero or non-finite deltas, the event is
/// [`WheelIntent::Native`].
#[must_use]
pub fn classify_wheel(input: &WheelInput, platform: Platform, wheel_factor: f64) -> WheelIntent {
    if !input.modifiers.has_command(platform) {
        return WheelIntent::Native;
    }
    if input.delta_y == 0.0
        || !input.delta_y.is_finite()
        || wheel_factor.is_nan()
        || wheel_factor <= 0.0
    {
        return WheelIntent::Native;
    }
    let factor = if input.delta_y < 0.0 {
        wheel_factor
    } else {
        1.0 / wheel_factor
    };
    WheelIntent::Zoom {
        factor,
        anchor: input.position,
    }
}
