// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection observer with scoped registrations.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::intersection::IntersectionEntry;
use crate::policy::MaskConfig;

#[derive(Debug)]
struct Target {
    bounds: Rect,
    generation: u64,
    last_masked: Option<bool>,
}

#[derive(Debug)]
struct Registry<K> {
    targets: HashMap<K, Target>,
    next_generation: u64,
}

impl<K: Hash + Eq> Registry<K> {
    fn release(&mut self, key: &K, generation: u64) {
        let current = self.targets.get(key).map(|t| t.generation);
        if current == Some(generation) {
            self.targets.remove(key);
        }
    }
}

// Shared between the observer and its guards. Guards dropped while `registry`
// is borrowed (inside a `tick` callback) queue their release in `deferred`.
#[derive(Debug)]
struct Shared<K> {
    registry: RefCell<Registry<K>>,
    deferred: RefCell<Vec<(K, u64)>>,
}

/// Watches card bounds against a root rectangle.
///
/// Cards are registered with [`IntersectionObserver::observe`], which returns
/// an [`Observation`] guard; dropping the guard stops observation. Each
/// [`IntersectionObserver::tick`] reports an entry for every card seen for the
/// first time and for every card whose masked state, under the configured
/// threshold, changed since its previous report.
pub struct IntersectionObserver<K> {
    shared: Rc<Shared<K>>,
    config: MaskConfig,
}

impl<K: fmt::Debug> fmt::Debug for IntersectionObserver<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionObserver")
            .field("config", &self.config)
            .field("observed", &self.shared.registry.borrow().targets.len())
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq + Clone> IntersectionObserver<K> {
    /// Creates an observer with no targets.
    #[must_use]
    pub fn new(config: MaskConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                registry: RefCell::new(Registry {
                    targets: HashMap::new(),
                    next_generation: 0,
                }),
                deferred: RefCell::new(Vec::new()),
            }),
            config,
        }
    }

    /// Observer settings.
    #[must_use]
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Starts observing `key` with canvas-space `bounds`.
    ///
    /// Observing a key that is already registered replaces the registration;
    /// the older guard becomes inert.
    pub fn observe(&self, key: K, bounds: Rect) -> Observation<K> {
        let mut registry = self.shared.registry.borrow_mut();
        let generation = registry.next_generation;
        registry.next_generation += 1;
        registry.targets.insert(
            key.clone(),
            Target {
                bounds,
                generation,
                last_masked: None,
            },
        );
        Observation {
            key,
            generation,
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Number of observed cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.registry.borrow().targets.len()
    }

    /// Returns `true` if nothing is observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is observed.
    #[must_use]
    pub fn is_observing(&self, key: &K) -> bool {
        self.shared.registry.borrow().targets.contains_key(key)
    }

    /// Stops observing every card. Outstanding guards become inert.
    pub fn disconnect(&self) {
        self.shared.registry.borrow_mut().targets.clear();
        self.shared.deferred.borrow_mut().clear();
    }

    /// Intersects every observed card with `root` and returns the entries that
    /// changed.
    ///
    /// `to_root` maps canvas-space bounds into root coordinates (for example
    /// the pan/zoom transform). [`Observation`]s dropped inside `to_root` are
    /// released before the tick returns and their cards are not reported; any
    /// other call back into the observer or its guards from `to_root` panics.
    pub fn tick(&self, root: Rect, to_root: impl Fn(Rect) -> Rect) -> Vec<(K, IntersectionEntry)> {
        let mut registry = self.shared.registry.borrow_mut();
        let margin = self.config.root_margin;
        let mut changed = Vec::new();
        for (key, target) in registry.targets.iter_mut() {
            let entry = IntersectionEntry::compute(to_root(target.bounds), root, margin);
            let masked = self.config.threshold.is_masked(entry.ratio);
            if target.last_masked != Some(masked) {
                target.last_masked = Some(masked);
                changed.push((key.clone(), entry));
            }
        }
        let deferred = core::mem::take(&mut *self.shared.deferred.borrow_mut());
        if !deferred.is_empty() {
            for (key, generation) in &deferred {
                registry.release(key, *generation);
            }
            changed.retain(|(key, _)| registry.targets.contains_key(key));
            #[cfg(feature = "tracing")]
            tracing::debug!(
                released = deferred.len(),
                "released observations dropped during tick"
            );
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            observed = registry.targets.len(),
            changed = changed.len(),
            "intersection tick"
        );
        changed
    }
}

/// Scoped registration returned by [`IntersectionObserver::observe`].
///
/// Dropping it stops observing the card, unless the key has since been
/// observed again through a newer guard.
pub struct Observation<K: Hash + Eq + Clone> {
    key: K,
    generation: u64,
    shared: Weak<Shared<K>>,
}

impl<K: Hash + Eq + Clone + fmt::Debug> fmt::Debug for Observation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("key", &self.key)
            .field("generation", &self.generation)
            .field("live", &self.is_live())
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq + Clone> Observation<K> {
    /// Key this guard observes.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns `true` while this guard's registration is still in the observer.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.shared.upgrade().is_some_and(|shared| {
            shared
                .registry
                .borrow()
                .targets
                .get(&self.key)
                .is_some_and(|t| t.generation == self.generation)
        })
    }

    /// Updates the observed bounds, e.g. after a re-layout. Inert guards ignore this.
    pub fn set_bounds(&self, bounds: Rect) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut registry = shared.registry.borrow_mut();
        if let Some(target) = registry.targets.get_mut(&self.key)
            && target.generation == self.generation
        {
            target.bounds = bounds;
        }
    }
}

impl<K: Hash + Eq + Clone> Drop for Observation<K> {
    fn drop(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        match shared.registry.try_borrow_mut() {
            Ok(mut registry) => {
                registry.release(&self.key, self.generation);
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("observation released during tick; deferring");
                shared
                    .deferred
                    .borrow_mut()
                    .push((self.key.clone(), self.generation));
            }
        }
    }
}
