//! In-memory task store.

use std::collections::vec_deque;
use std::slice;

use tracing::{debug, trace};

use super::SortKey;
use super::ledger::Ledger;
use super::priority::PriorityQueue;
use super::search::find_first_by_key;
use crate::config::StoreConfig;
use crate::domain::{
    DateZone, Handle, NewTask, StoreError, SubmissionDate, Task, TaskId, ThresholdDates,
};
use crate::observability::StoreCounts;
use crate::ports::{Clock, SystemClock};

/// Priority task store.
///
/// Design:
/// - `tasks` is the arena and the single owner of every task.
/// - The ledger and the queue hold `Handle`s only.
/// - Tasks are never removed from the arena, so handles stay valid for the
///   store's lifetime and the ledger doubles as an audit trail.
/// - Dispatch only pops the queue; the ledger keeps dispatched tasks.
///
/// Not synchronized. Wrap it in `impls::SharedTaskStore` to share it between
/// threads.
#[derive(Debug)]
pub struct TaskStore<C = SystemClock> {
    tasks: Vec<Task>,
    ledger: Ledger,
    queue: PriorityQueue,
    dispatched: usize,
    clock: C,
    zone: DateZone,
    thresholds: ThresholdDates,
}

impl TaskStore<SystemClock> {
    /// Store stamping local-calendar dates from the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::from_config(clock, &StoreConfig::default())
    }

    pub fn from_config(clock: C, config: &StoreConfig) -> Self {
        Self {
            tasks: Vec::new(),
            ledger: Ledger::new(),
            queue: PriorityQueue::new(),
            dispatched: 0,
            clock,
            zone: config.date_zone,
            thresholds: config.threshold_dates,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Today's date as this store would stamp it.
    pub fn today(&self) -> SubmissionDate {
        self.zone.date_of(self.clock.now())
    }

    /// Stamp `new` with today's date, append it to the ledger and insert it
    /// into the dispatch order.
    pub fn enqueue(&mut self, new: NewTask) -> Handle {
        let submission_date = self.today();
        let handle = Handle::from_index(self.tasks.len());
        let priority = new.priority;
        self.tasks.push(Task::stamp(new, submission_date));
        self.ledger.push(handle);

        let tasks = &self.tasks;
        let position = self
            .queue
            .insert(handle, priority, |h| tasks[h.index()].priority());

        debug!(
            task_id = %tasks[handle.index()].id(),
            priority,
            position,
            %submission_date,
            queued = self.queue.len(),
            "task enqueued"
        );
        handle
    }

    /// Remove the head of the dispatch order and return its task.
    ///
    /// An empty queue is a normal outcome and yields `None`. The ledger keeps
    /// the task.
    pub fn dequeue_highest_priority(&mut self) -> Option<&Task> {
        let Some(handle) = self.queue.pop_front() else {
            debug!("queue is empty");
            return None;
        };
        self.dispatched += 1;

        let task = &self.tasks[handle.index()];
        debug!(
            task_id = %task.id(),
            priority = task.priority(),
            queued = self.queue.len(),
            "task dequeued"
        );
        Some(task)
    }

    /// First task in ledger order carrying `id`.
    ///
    /// Sorts a scratch copy of the ledger by id and binary-searches it; the
    /// canonical order is left as it was.
    pub fn find_by_id(&self, id: TaskId) -> Option<&Task> {
        let found = find_first_by_key(self.ledger.as_slice(), &id, |h| {
            self.tasks[h.index()].id()
        });
        trace!(task_id = %id, found = found.is_some(), "lookup by id");
        found.map(|h| &self.tasks[h.index()])
    }

    /// Replace the ledger's canonical order with a full sort by `key`.
    ///
    /// The sort is stable, so repeating it changes nothing. The dispatch order
    /// is not touched.
    pub fn reorder(&mut self, key: SortKey) {
        let tasks = &self.tasks;
        match key {
            SortKey::Priority => self.ledger.sort_by(|a, b| {
                tasks[b.index()]
                    .priority()
                    .cmp(&tasks[a.index()].priority())
            }),
            SortKey::SubmissionDate => self.ledger.sort_by(|a, b| {
                tasks[a.index()]
                    .submission_date()
                    .cmp(&tasks[b.index()].submission_date())
            }),
        }
        debug!(%key, entries = self.ledger.len(), "ledger reordered");
    }

    /// Number of ledger tasks submitted on or before `threshold`.
    pub fn count_by_submission_threshold(&self, threshold: SubmissionDate) -> usize {
        let count = self
            .ledger
            .iter()
            .filter(|h| self.tasks[h.index()].submission_date() <= threshold)
            .count();
        trace!(%threshold, count, "threshold count");
        count
    }

    /// Like `count_by_submission_threshold`, parsing `raw` with the store's
    /// threshold date policy.
    pub fn count_by_submission_threshold_str(&self, raw: &str) -> Result<usize, StoreError> {
        let threshold = self.thresholds.parse(raw)?;
        Ok(self.count_by_submission_threshold(threshold))
    }
}

impl<C> TaskStore<C> {
    /// Live tasks in dispatch order, head to tail.
    ///
    /// Lazy and non-consuming; call again (or clone the iterator) to restart.
    pub fn iter(&self) -> Queued<'_> {
        Iter {
            tasks: &self.tasks,
            handles: self.queue.iter(),
        }
    }

    /// Every task the store has held, in canonical ledger order.
    pub fn ledger(&self) -> LedgerIter<'_> {
        Iter {
            tasks: &self.tasks,
            handles: self.ledger.iter(),
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&Task> {
        self.tasks.get(handle.index())
    }

    /// Is `handle` still waiting for dispatch?
    pub fn is_queued(&self, handle: Handle) -> bool {
        self.queue.contains(handle)
    }

    /// Live task count: enqueues minus successful dequeues.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    pub fn ledger_len(&self) -> usize {
        self.ledger.len()
    }

    /// No task is waiting for dispatch.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            ledger: self.ledger.len(),
            queued: self.queue.len(),
            dispatched: self.dispatched,
        }
    }
}

/// Iterator over tasks addressed by a sequence of handles.
#[derive(Debug, Clone)]
pub struct Iter<'a, I> {
    tasks: &'a [Task],
    handles: I,
}

/// Dispatch-order iterator returned by `TaskStore::iter`.
pub type Queued<'a> = Iter<'a, vec_deque::Iter<'a, Handle>>;

/// Ledger-order iterator returned by `TaskStore::ledger`.
pub type LedgerIter<'a> = Iter<'a, slice::Iter<'a, Handle>>;

impl<'a, I: Iterator<Item = &'a Handle>> Iterator for Iter<'a, I> {
    type Item = &'a Task;

    fn next(&mut self) -> Option<Self::Item> {
        let tasks = self.tasks;
        self.handles.next().map(|h| &tasks[h.index()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.handles.size_hint()
    }
}

impl<'a, I: ExactSizeIterator<Item = &'a Handle>> ExactSizeIterator for Iter<'a, I> {}
