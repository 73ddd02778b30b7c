//! SharedTaskStore - マルチスレッドなホスト向けの TaskQueue 実装
//!
//! # 実装詳細
//! - `Arc<Mutex<TaskStore>>` で ledger と queue を 1 つのロックで守る
//! - reorder と enqueue/dequeue は必ず排他になる
//! - 参照はロックの外に出せないので、読み出しは clone を返す

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Handle, NewTask, SubmissionDate, Task, TaskId};
use crate::observability::StoreCounts;
use crate::ports::{Clock, SystemClock, TaskQueue};
use crate::store::{SortKey, TaskStore};

/// Clonable handle to one task store guarded by a single lock.
pub struct SharedTaskStore<C = SystemClock> {
    state: Arc<Mutex<TaskStore<C>>>,
}

impl<C> Clone for SharedTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<C: Clock> SharedTaskStore<C> {
    pub fn new(store: TaskStore<C>) -> Self {
        Self {
            state: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// For multi-step work that must not interleave with other callers.
    pub async fn with<R>(&self, f: impl FnOnce(&mut TaskStore<C>) -> R) -> R {
        let mut store = self.state.lock().await;
        f(&mut store)
    }
}

impl<C: Clock> From<TaskStore<C>> for SharedTaskStore<C> {
    fn from(store: TaskStore<C>) -> Self {
        Self::new(store)
    }
}

#[async_trait]
impl<C: Clock + 'static> TaskQueue for SharedTaskStore<C> {
    async fn enqueue(&self, task: NewTask) -> Handle {
        self.state.lock().await.enqueue(task)
    }

    async fn dequeue_highest_priority(&self) -> Option<Task> {
        self.state.lock().await.dequeue_highest_priority().cloned()
    }

    async fn find_by_id(&self, id: TaskId) -> Option<Task> {
        self.state.lock().await.find_by_id(id).cloned()
    }

    async fn reorder(&self, key: SortKey) {
        self.state.lock().await.reorder(key);
    }

    async fn count_by_submission_threshold(&self, threshold: SubmissionDate) -> usize {
        self.state
            .lock()
            .await
            .count_by_submission_threshold(threshold)
    }

    async fn snapshot(&self) -> Vec<Task> {
        self.state.lock().await.iter().cloned().collect()
    }

    async fn ledger_snapshot(&self) -> Vec<Task> {
        self.state.lock().await.ledger().cloned().collect()
    }

    async fn counts(&self) -> StoreCounts {
        self.state.lock().await.counts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::domain::DateZone;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    fn shared() -> SharedTaskStore<FixedClock> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 27, 8, 0, 0).unwrap());
        let config = StoreConfig {
            date_zone: DateZone::Utc,
            ..StoreConfig::default()
        };
        SharedTaskStore::new(TaskStore::from_config(clock, &config))
    }

    #[tokio::test]
    async fn dequeue_returns_owned_task() {
        let queue = shared();
        queue.enqueue(NewTask::new(1, "Alice", 3)).await;
        queue.enqueue(NewTask::new(2, "Charlie", 5)).await;

        let task = queue.dequeue_highest_priority().await.unwrap();
        assert_eq!(task.owner(), "Charlie");
        assert_eq!(task.submission_date().to_string(), "2025-05-27");

        let live: Vec<_> = queue.snapshot().await.into_iter().map(|t| t.id()).collect();
        assert_eq!(live, vec![TaskId::new(1)]);
        assert_eq!(queue.ledger_snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn empty_queue_and_missing_id_are_none() {
        let queue = shared();
        assert!(queue.dequeue_highest_priority().await.is_none());
        assert!(queue.find_by_id(TaskId::new(42)).await.is_none());
        assert_eq!(queue.counts().await, StoreCounts::default());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_enqueues_keep_both_views_consistent() {
        let queue = shared();
        let mut handles = Vec::new();
        for worker in 0..8i64 {
            let queue = queue.clone();
            handles.push(tokio::spawn(async move {
                for n in 0..25i64 {
                    let id = worker * 100 + n;
                    queue.enqueue(NewTask::new(id, format!("w{worker}"), (n % 5) as i32)).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let counts = queue.counts().await;
        assert_eq!(counts.ledger, 200);
        assert_eq!(counts.queued, 200);

        let priorities: Vec<_> = queue
            .snapshot()
            .await
            .iter()
            .map(Task::priority)
            .collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn with_runs_steps_under_one_lock() {
        let queue = shared();
        let (dispatched, remaining) = queue
            .with(|store| {
                store.enqueue(NewTask::new(1, "Alice", 1));
                store.enqueue(NewTask::new(2, "Bob", 2));
                let id = store.dequeue_highest_priority().map(Task::id);
                (id, store.queued_len())
            })
            .await;

        assert_eq!(dispatched, Some(TaskId::new(2)));
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn reorder_and_threshold_through_the_port() {
        let queue = shared();
        queue.enqueue(NewTask::new(1, "low", 1)).await;
        queue.enqueue(NewTask::new(2, "high", 9)).await;
        queue.reorder(SortKey::Priority).await;

        let ledger: Vec<_> = queue
            .ledger_snapshot()
            .await
            .into_iter()
            .map(|t| t.owner().to_string())
            .collect();
        assert_eq!(ledger, vec!["high", "low"]);

        let today = "2025-05-27".parse().unwrap();
        assert_eq!(queue.count_by_submission_threshold(today).await, 2);
        let before = "2025-05-26".parse().unwrap();
        assert_eq!(queue.count_by_submission_threshold(before).await, 0);
    }
}
