//! Store module: the ledger, the priority queue and the store that keeps them
//! consistent.

mod ledger;
mod memory;
mod priority;
mod search;

pub use memory::{Iter, LedgerIter, Queued, TaskStore};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::StoreError;

/// Key for re-ordering the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Most urgent first.
    Priority,

    /// Oldest first.
    SubmissionDate,
}

impl FromStr for SortKey {
    type Err = StoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "priority" => Ok(SortKey::Priority),
            "submissionDate" | "submission_date" | "date" => Ok(SortKey::SubmissionDate),
            other => Err(StoreError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Priority => f.write_str("priority"),
            SortKey::SubmissionDate => f.write_str("submissionDate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::priority("priority", SortKey::Priority)]
    #[case::camel("submissionDate", SortKey::SubmissionDate)]
    #[case::snake("submission_date", SortKey::SubmissionDate)]
    #[case::short(" date ", SortKey::SubmissionDate)]
    fn sort_keys_parse(#[case] raw: &str, #[case] expected: SortKey) {
        assert_eq!(raw.parse::<SortKey>(), Ok(expected));
    }

    #[test]
    fn unknown_sort_key_is_an_error() {
        assert_eq!(
            "owner".parse::<SortKey>(),
            Err(StoreError::UnknownSortKey("owner".to_string()))
        );
    }

    #[test]
    fn sort_key_serde_uses_display_names() {
        assert_eq!(
            serde_json::to_string(&SortKey::SubmissionDate).unwrap(),
            "\"submissionDate\""
        );
        assert_eq!(SortKey::SubmissionDate.to_string(), "submissionDate");
    }
}
