// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::intersection::IntersectionEntry;
use crate::policy::MaskThreshold;

/// What a card should render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskView {
    /// Render the real content, reserving at least `min_size` so that
    /// unmasking never shrinks the card.
    Content {
        /// First-measured size, if it was non-zero.
        min_size: Option<Size>,
    },
    /// Render an empty box of exactly `size` instead of the content.
    Placeholder {
        /// First-measured size.
        size: Size,
    },
}

/// Cosmetic box drawn over a card, visible only while the card is masked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    /// Covers the placeholder exactly.
    pub size: Size,
    /// `true` while masked.
    pub visible: bool,
}

/// Per-card mask state.
///
/// The card is measured once, on first mount, and that size is used for the
/// placeholder for the life of the instance. Mask state follows the latest
/// intersection entry; before any entry arrives the card is unmasked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityMask {
    measured: Option<Size>,
    masked: bool,
}

impl VisibilityMask {
    /// Creates an unmeasured, unmasked mask.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures the card on first call and returns the stored size on every call.
    ///
    /// `measure` runs at most once per instance. Non-finite or negative
    /// measurements are stored as zero.
    pub fn measure_once(&mut self, measure: impl FnOnce() -> Size) -> Size {
        *self.measured.get_or_insert_with(|| {
            let size = measure();
            if size.is_finite() {
                Size::new(size.width.max(0.0), size.height.max(0.0))
            } else {
                Size::ZERO
            }
        })
    }

    /// Returns `true` once [`VisibilityMask::measure_once`] has run.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.measured.is_some()
    }

    /// The measured size, zero before measurement.
    #[must_use]
    pub fn measured_size(&self) -> Size {
        self.measured.unwrap_or(Size::ZERO)
    }

    /// Returns `true` while the card is masked.
    #[must_use]
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Applies an intersection observation. Returns `true` if the mask toggled.
    pub fn observe(&mut self, entry: &IntersectionEntry, threshold: MaskThreshold) -> bool {
        let masked = threshold.is_masked(entry.ratio);
        if masked == self.masked {
            return false;
        }
        self.masked = masked;
        #[cfg(feature = "tracing")]
        tracing::trace!(masked, ratio = entry.ratio, "visibility mask toggled");
        true
    }

    /// What the card should render right now.
    #[must_use]
    pub fn view(&self) -> MaskView {
        let size = self.measured_size();
        if self.masked {
            MaskView::Placeholder { size }
        } else {
            let min_size = (size.width > 0.0 || size.height > 0.0).then_some(size);
            MaskView::Content { min_size }
        }
    }

    /// The covering overlay.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        Overlay {
            size: self.measured_size(),
            visible: self.masked,
        }
    }
}
