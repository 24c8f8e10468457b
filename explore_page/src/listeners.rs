// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host event listeners with scoped registration.

use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use smallvec::SmallVec;

/// Kind of host event the page listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Wheel events on the canvas container.
    Wheel,
    /// Pan-end notifications from the pan/zoom engine.
    PanEnd,
    /// Window resize.
    Resize,
    /// Window key presses.
    KeyDown,
}

type Entries = SmallVec<[(u64, ListenerKind); 4]>;

/// The host's listener table.
///
/// [`ListenerSet::add`] hands out a [`Subscription`]; the listener stays
/// registered exactly as long as the subscription lives.
#[derive(Debug, Default)]
pub struct ListenerSet {
    entries: Rc<RefCell<Entries>>,
    next_id: Cell<u64>,
}

impl ListenerSet {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn add(&self, kind: ListenerKind) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, kind));
        #[cfg(feature = "tracing")]
        tracing::trace!(?kind, id, "listener added");
        Subscription {
            id,
            kind,
            entries: Rc::downgrade(&self.entries),
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registered listeners of one kind.
    #[must_use]
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, k)| *k == kind)
            .count()
    }
}

/// A live listener registration. Dropping it removes the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    entries: Weak<RefCell<Entries>>,
}

impl Subscription {
    /// Kind of the registered listener.
    #[must_use]
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(entries) = self.entries.upgrade() else {
            return;
        };
        let entries = entries.try_borrow_mut();
        debug_assert!(
            entries.is_ok(),
            "listener table borrowed while releasing {:?}",
            self.kind
        );
        let Ok(mut entries) = entries else {
            #[cfg(feature = "tracing")]
            tracing::warn!(kind = ?self.kind, id = self.id, "listener table busy; listener kept");
            return;
        };
        let before = entries.len();
        entries.retain(|(id, _)| *id != self.id);
        #[cfg(feature = "tracing")]
        if entries.len() < before {
            tracing::trace!(kind = ?self.kind, id = self.id, "listener removed");
        }
        #[cfg(not(feature = "tracing"))]
        let _ = before;
    }
}
