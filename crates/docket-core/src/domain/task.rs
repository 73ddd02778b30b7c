//! Task: the unit of work held by the store.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::date::SubmissionDate;
use super::ids::TaskId;

/// Workflow label attached to a task.
///
/// The set is open: labels the store does not know are kept verbatim in `Other`.
/// Validating them is the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Other(label) => label,
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(label: &str) -> Self {
        let label = label.trim();
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "pending" => TaskStatus::Pending,
            "inprogress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            _ => TaskStatus::Other(label.to_string()),
        }
    }
}

impl From<String> for TaskStatus {
    fn from(label: String) -> Self {
        TaskStatus::from(label.as_str())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Infallible;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Ok(TaskStatus::from(label))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Already-validated fields a caller submits to `enqueue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub id: TaskId,
    pub owner: String,
    #[serde(default)]
    pub description: String,
    pub priority: i32,
    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(id: i64, owner: impl Into<String>, priority: i32) -> Self {
        Self {
            id: TaskId::new(id),
            owner: owner.into(),
            description: String::new(),
            priority,
            status: TaskStatus::Pending,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: impl Into<TaskStatus>) -> Self {
        self.status = status.into();
        self
    }
}

/// A task as stored. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    owner: String,
    description: String,
    priority: i32,
    status: TaskStatus,
    submission_date: SubmissionDate,
}

impl Task {
    pub(crate) fn stamp(new: NewTask, submission_date: SubmissionDate) -> Self {
        Self {
            id: new.id,
            owner: new.owner,
            description: new.description,
            priority: new.priority,
            status: new.status,
            submission_date,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn status(&self) -> &TaskStatus {
        &self.status
    }

    pub fn submission_date(&self) -> SubmissionDate {
        self.submission_date
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task ID: {}, Owner: {}, Description: {}, Priority: {}, Status: {}, Submission Date: {}",
            self.id, self.owner, self.description, self.priority, self.status, self.submission_date
        )
    }
}
