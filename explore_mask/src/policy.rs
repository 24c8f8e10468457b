// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Insets;

/// When a card counts as off-screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskThreshold {
    /// Mask only when nothing of the card is inside the root (ratio `== 0`).
    #[default]
    Hidden,
    /// Mask as soon as any part of the card is outside the root (ratio `< 1`).
    Occluded,
}

impl MaskThreshold {
    /// Returns `true` if a card with this intersection ratio should be masked.
    #[must_use]
    pub fn is_masked(self, ratio: f64) -> bool {
        match self {
            Self::Hidden => ratio.is_nan() || ratio <= 0.0,
            Self::Occluded => ratio.is_nan() || ratio < 1.0,
        }
    }
}

/// Observer settings shared by every card on a page.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaskConfig {
    /// Masking threshold.
    pub threshold: MaskThreshold,
    /// Growth applied to the root before intersecting; positive values unmask
    /// cards slightly before they scroll into view.
    pub root_margin: Insets,
}

impl MaskConfig {
    /// Sets the threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: MaskThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the root margin.
    #[must_use]
    pub fn with_root_margin(mut self, root_margin: Insets) -> Self {
        self.root_margin = root_margin;
        self
    }
}
