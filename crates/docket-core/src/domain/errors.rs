//! Errors raised by the store's parsing boundary.
//!
//! An empty queue on dequeue and a miss on lookup are ordinary outcomes and
//! are reported as `None`, never through these types.

use thiserror::Error;

use super::date::DateError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown sort key '{0}' (expected 'priority' or 'submissionDate')")]
    UnknownSortKey(String),

    #[error(transparent)]
    Date(#[from] DateError),
}
