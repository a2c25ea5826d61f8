//! Per-window notification counter
//!
//! Tracks how many notifications are currently *shown* for each parent
//! window. Counts move only when a notification is revealed or closed, never
//! at construction. Entries are created lazily and live as long as the
//! registry.

use std::cell::RefCell;
use std::rc::Rc;

use qflow_core::WindowId;
use rustc_hash::FxHashMap;

/// Shared handle to the shown-notification counters of a session
///
/// Cloning yields another handle to the same counters.
#[derive(Clone, Debug, Default)]
pub struct NotificationRegistry {
    counts: Rc<RefCell<FxHashMap<WindowId, u32>>>,
}

impl NotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether another notification may be shown for `parent`
    ///
    /// Registers `parent` with a count of zero the first time it is seen.
    pub fn try_admit(&self, parent: WindowId, limit: u32) -> bool {
        let mut counts = self.counts.borrow_mut();
        let count = *counts.entry(parent).or_insert(0);
        count < limit
    }

    /// Record a notification becoming visible; returns the new count
    pub fn increment(&self, parent: WindowId) -> u32 {
        let mut counts = self.counts.borrow_mut();
        let count = counts.entry(parent).or_insert(0);
        *count += 1;
        *count
    }

    /// Record a shown notification closing; returns the new count
    ///
    /// Never goes below zero.
    pub fn decrement(&self, parent: WindowId) -> u32 {
        let mut counts = self.counts.borrow_mut();
        match counts.get_mut(&parent) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *count
            }
            _ => {
                tracing::warn!(?parent, "notification count already zero");
                0
            }
        }
    }

    /// Current shown count (zero for unseen parents)
    pub fn count(&self, parent: WindowId) -> u32 {
        self.counts.borrow().get(&parent).copied().unwrap_or(0)
    }

    /// Number of parent windows seen so far
    pub fn parents(&self) -> usize {
        self.counts.borrow().len()
    }
}
