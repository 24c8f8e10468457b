// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modifier key state and platform-dependent zoom modifier.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL = 0b0001;
        /// Meta key (Cmd on Mac, Windows key elsewhere).
        const META = 0b0010;
        /// Shift key.
        const SHIFT = 0b0100;
        /// Alt / Option key.
        const ALT = 0b1000;
    }
}

/// Host platform, as far as modifier conventions are concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Apple platforms: Cmd is the command modifier.
    Mac,
    /// Everything else: Ctrl is the command modifier.
    #[default]
    Other,
}

impl Platform {
    /// Detects the platform from a platform identifier such as `navigator.platform`.
    ///
    /// Any string containing `Mac` (`MacIntel`, `MacPPC`, ...) is treated as [`Platform::Mac`].
    #[must_use]
    pub fn from_platform_str(platform: &str) -> Self {
        if platform.contains("Mac") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    /// The modifier that turns wheel scrolling into zooming and arms keyboard shortcuts.
    #[must_use]
    pub fn command_modifier(self) -> Modifiers {
        match self {
            Self::Mac => Modifiers::META,
            Self::Other => Modifiers::CTRL,
        }
    }
}

impl Modifiers {
    /// Returns `true` if the platform's command modifier is held.
    ///
    /// Other modifiers may be held as well; `Shift` in particular is often
    /// needed to type `+`.
    #[must_use]
    pub fn has_command(self, platform: Platform) -> bool {
        self.contains(platform.command_modifier())
    }
}
