//! Per-device temperature calibration.
//!
//! The store is a cloneable handle. Readers take an `Arc` snapshot of the
//! entry list and never block writers for longer than the pointer swap;
//! writers build a new list and swap it in under the write lock.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tolerance used when matching identities.
pub const DEFAULT_EPSILON: f64 = 0.0001;

/// Additive temperature correction for one device.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationEntry {
    pub identity: f64,
    pub offset: f64,
}

/// Shared identity -> offset map, matched within an epsilon.
#[derive(Clone, Debug)]
pub struct CalibrationStore {
    entries: Arc<RwLock<Arc<Vec<CalibrationEntry>>>>,
    epsilon: f64,
}

impl Default for CalibrationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationStore {
    pub fn new() -> Self {
        Self::with_epsilon(DEFAULT_EPSILON)
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Arc::new(Vec::new()))),
            epsilon,
        }
    }

    /// Build a store from a list of entries. Later duplicates are ignored.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CalibrationEntry>,
    {
        let store = Self::new();
        store.replace(entries);
        store
    }

    fn matches(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.epsilon
    }

    fn position(&self, entries: &[CalibrationEntry], identity: f64) -> Option<usize> {
        entries
            .iter()
            .position(|e| self.matches(e.identity, identity))
    }

    /// Current entries.
    pub fn entries(&self) -> Arc<Vec<CalibrationEntry>> {
        Arc::clone(&self.entries.read())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Offset for `identity`, if a device within epsilon is registered.
    pub fn offset_for(&self, identity: f64) -> Option<f64> {
        let entries = self.entries();
        let offset = self
            .position(&entries, identity)
            .map(|i| entries[i].offset);
        trace!(identity, ?offset, "calibration lookup");
        offset
    }

    /// Register a device. The first registration for an identity wins.
    ///
    /// # Returns
    /// `true` if the entry was added, `false` if the identity was already
    /// present.
    pub fn register(&self, identity: f64, offset: f64) -> bool {
        let mut guard = self.entries.write();
        if self.position(&guard, identity).is_some() {
            return false;
        }
        let mut next = Vec::clone(&guard);
        next.push(CalibrationEntry { identity, offset });
        *guard = Arc::new(next);
        true
    }

    /// Insert or overwrite the offset for `identity`.
    pub fn set(&self, identity: f64, offset: f64) {
        let mut guard = self.entries.write();
        let mut next = Vec::clone(&guard);
        match self.position(&next, identity) {
            Some(i) => next[i].offset = offset,
            None => next.push(CalibrationEntry { identity, offset }),
        }
        *guard = Arc::new(next);
    }

    /// Remove the entry for `identity`, returning its offset.
    pub fn remove(&self, identity: f64) -> Option<f64> {
        let mut guard = self.entries.write();
        let i = self.position(&guard, identity)?;
        let mut next = Vec::clone(&guard);
        let removed = next.remove(i);
        *guard = Arc::new(next);
        Some(removed.offset)
    }

    /// Swap in a complete new set of entries.
    pub fn replace<I>(&self, entries: I)
    where
        I: IntoIterator<Item = CalibrationEntry>,
    {
        let mut next: Vec<CalibrationEntry> = Vec::new();
        for entry in entries {
            if self.position(&next, entry.identity).is_none() {
                next.push(entry);
            }
        }
        *self.entries.write() = Arc::new(next);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        *self.entries.write() = Arc::new(Vec::new());
    }
}
