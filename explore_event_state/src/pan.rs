// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan tracking: convert pointer drags into an absolute canvas offset.
//!
//! The Explore viewport consumes pan positions as the total offset the user
//! has dragged the canvas by since mount, not as per-move deltas. A
//! [`PanTracker`] keeps that running total across separate drag gestures.
//!
//! ## Usage
//!
//! 1) Call [`PanTracker::start`] on pointer down.
//! 2) On each move, [`PanTracker::update`] returns the absolute offset.
//! 3) [`PanTracker::end`] commits the gesture into the running total.
//! 4) [`PanTracker::reset`] drops everything, e.g. when the view is reset.

use kurbo::{Point, Vec2};

/// Tracks the absolute pan offset produced by pointer drags.
#[derive(Debug, Clone, Default, Copy)]
pub struct PanTracker {
    /// Offset committed by drags that have already ended.
    committed: Vec2,
    /// Pointer position where the active drag started.
    start_pos: Option<Point>,
    /// Last pointer position seen during the active drag.
    last_pos: Option<Point>,
}

impl PanTracker {
    /// Start a new drag at the given pointer position.
    ///
    /// Starting while a drag is active commits the active drag first.
    pub fn start(&mut self, pos: Point) {
        if self.start_pos.is_some() {
            self.end();
        }
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Feed a pointer move, returning the absolute offset since mount.
    ///
    /// Returns `None` when no drag is active or the pointer did not move.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        if self.last_pos == Some(pos) {
            return None;
        }
        self.last_pos = Some(pos);
        Some(self.committed + (pos - start))
    }

    /// End the active drag, folding its movement into the committed offset.
    pub fn end(&mut self) {
        if let (Some(start), Some(last)) = (self.start_pos, self.last_pos) {
            self.committed += last - start;
        }
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Current absolute offset, including any drag in progress.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        match (self.start_pos, self.last_pos) {
            (Some(start), Some(last)) => self.committed + (last - start),
            _ => self.committed,
        }
    }

    /// Replace the running offset, e.g. after the engine was moved programmatically.
    ///
    /// Any drag in progress is cancelled.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.committed = offset;
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Forget all movement.
    pub fn reset(&mut self) {
        self.set_offset(Vec2::ZERO);
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
