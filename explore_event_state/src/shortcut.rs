// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard zoom shortcuts.

use crate::modifiers::{Modifiers, Platform};

/// Zoom step requested from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomShortcut {
    /// Command + `+`.
    ZoomIn,
    /// Command + `-`.
    ZoomOut,
}

/// Matches a key press against the zoom shortcuts.
///
/// `key` is the logical key value of the press (for example the DOM
/// `KeyboardEvent.key`). Returns `None` unless the platform's command modifier
/// is held and the key is `+` or `-`.
#[must_use]
pub fn match_shortcut(key: &str, modifiers: Modifiers, platform: Platform) -> Option<ZoomShortcut> {
    if !modifiers.has_command(platform) {
        return None;
    }
    match key {
        "+" => Some(ZoomShortcut::ZoomIn),
        "-" => Some(ZoomShortcut::ZoomOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_and_minus_with_command() {
        assert_eq!(
            match_shortcut("+", Modifiers::CTRL | Modifiers::SHIFT, Platform::Other),
            Some(ZoomShortcut::ZoomIn)
        );
        assert_eq!(
            match_shortcut("-", Modifiers::META, Platform::Mac),
            Some(ZoomShortcut::ZoomOut)
        );
    }

    #[test]
    fn missing_modifier_or_other_key_is_ignored() {
        assert_eq!(
            match_shortcut("+", Modifiers::empty(), Platform::Other),
            None
        );
        assert_eq!(match_shortcut("-", Modifiers::CTRL, Platform::Mac), None);
        assert_eq!(match_shortcut("0", Modifiers::CTRL, Platform::Other), None);
        assert_eq!(match_shortcut("a", Modifiers::META, Platform::Mac), None);
    }
}
