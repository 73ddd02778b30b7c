//! Dispatch order: descending priority, first-come first-served among equals.

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::domain::Handle;

/// Ordered view of live handles, head (front) to tail (back).
///
/// Insertion is a linear scan; the queue never rebalances.
#[derive(Debug, Default, Clone)]
pub(crate) struct PriorityQueue {
    slots: VecDeque<Handle>,
}

impl PriorityQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert `handle` with `priority` and return the position it landed at.
    ///
    /// A new arrival only jumps ahead of the head when strictly more urgent;
    /// everywhere else it lands behind every slot of equal or higher priority.
    pub(crate) fn insert(
        &mut self,
        handle: Handle,
        priority: i32,
        priority_of: impl Fn(Handle) -> i32,
    ) -> usize {
        let Some(&head) = self.slots.front() else {
            self.slots.push_back(handle);
            return 0;
        };
        if priority > priority_of(head) {
            self.slots.push_front(handle);
            return 0;
        }

        let mut at = 0;
        while let Some(&next) = self.slots.get(at + 1) {
            if priority_of(next) < priority {
                break;
            }
            at += 1;
        }
        self.slots.insert(at + 1, handle);
        at + 1
    }

    pub(crate) fn pop_front(&mut self) -> Option<Handle> {
        self.slots.pop_front()
    }

    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.slots.contains(&handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn iter(&self) -> vec_deque::Iter<'_, Handle> {
        self.slots.iter()
    }
}
