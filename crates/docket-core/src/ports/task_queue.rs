//! TaskQueue port - 複数スレッドから使うための非同期インターフェース
//!
//! `TaskStore` 自体は同期・単一スレッド前提。ホストがマルチスレッドの場合は
//! この trait の実装（`impls::SharedTaskStore`）を通して 1 つのロックで
//! ledger と queue をまとめて守る。

use async_trait::async_trait;

use crate::domain::{Handle, NewTask, SubmissionDate, Task, TaskId};
use crate::observability::StoreCounts;
use crate::store::SortKey;

/// Locked access to a task store.
///
/// References cannot outlive the lock, so every read returns owned clones.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Stamp and insert a task.
    async fn enqueue(&self, task: NewTask) -> Handle;

    /// Dispatch the highest-priority live task, or `None` when the queue is empty.
    async fn dequeue_highest_priority(&self) -> Option<Task>;

    /// First ledger task with `id`, or `None`.
    async fn find_by_id(&self, id: TaskId) -> Option<Task>;

    /// Re-sort the ledger. The dispatch order is unaffected.
    async fn reorder(&self, key: SortKey);

    /// Ledger tasks submitted on or before `threshold`.
    async fn count_by_submission_threshold(&self, threshold: SubmissionDate) -> usize;

    /// Live tasks in dispatch order.
    async fn snapshot(&self) -> Vec<Task>;

    /// Every task in ledger order.
    async fn ledger_snapshot(&self) -> Vec<Task>;

    async fn counts(&self) -> StoreCounts;
}
