//! Ledger: every task the store has held, in canonical order.

use std::cmp::Ordering;
use std::slice;

use crate::domain::Handle;

/// Handles in canonical order.
///
/// Insertion order until the first `sort_by`; after that the sorted order is
/// the canonical one. The ledger only grows.
#[derive(Debug, Default, Clone)]
pub(crate) struct Ledger {
    entries: Vec<Handle>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, handle: Handle) {
        self.entries.push(handle);
    }

    /// Stable: entries comparing equal keep their current relative order.
    pub(crate) fn sort_by(&mut self, compare: impl FnMut(&Handle, &Handle) -> Ordering) {
        self.entries.sort_by(compare);
    }

    pub(crate) fn as_slice(&self) -> &[Handle] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, Handle> {
        self.entries.iter()
    }
}
