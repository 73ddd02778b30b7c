use serde::{Deserialize, Serialize};

/// Snapshot of the store's sizes.
///
/// `ledger` only grows; `queued` is `ledger - dispatched`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub ledger: usize,
    pub queued: usize,
    pub dispatched: usize,
}
