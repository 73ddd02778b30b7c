//! Operation scripts: one JSON object per line, executed in order against a
//! `TaskQueue`.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use docket_core::{
    Handle, NewTask, SortKey, StoreCounts, SubmissionDate, Task, TaskId, TaskQueue, ThresholdDates,
};

/// One store operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Enqueue(NewTask),
    Dequeue,
    Find { id: TaskId },
    Reorder { key: String },
    Count { threshold: String },
    List,
    Ledger,
    Stats,
}

/// Result of one operation, printable as text or JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outcome {
    Enqueue { id: TaskId, handle: Handle },
    Dequeue { task: Option<Task> },
    Find { id: TaskId, task: Option<Task> },
    Reorder { key: SortKey },
    Count { threshold: SubmissionDate, count: usize },
    List { tasks: Vec<Task> },
    Ledger { tasks: Vec<Task> },
    Stats(StoreCounts),
}

/// Parse a JSON-lines script. Blank lines and `#` comments are skipped.
///
/// Returns each operation with its 1-based line number.
pub fn parse(raw: &str) -> Result<Vec<(usize, Op)>> {
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| -> Result<(usize, Op)> {
            let op = serde_json::from_str(line)
                .with_context(|| format!("line {n}: bad operation"))?;
            Ok((n, op))
        })
        .collect()
}

/// The walkthrough run when no script is given.
pub fn demo(today: SubmissionDate) -> Vec<(usize, Op)> {
    let ops = vec![
        Op::Enqueue(NewTask::new(101, "Alice", 3).description("Fix login bug")),
        Op::Enqueue(
            NewTask::new(102, "Bob", 1)
                .description("Update UI")
                .status("In_Progress"),
        ),
        Op::Enqueue(NewTask::new(103, "Charlie", 5).description("Database migration")),
        Op::List,
        Op::Dequeue,
        Op::List,
        Op::Find { id: TaskId::new(102) },
        Op::Find { id: TaskId::new(999) },
        Op::Reorder {
            key: SortKey::Priority.to_string(),
        },
        Op::Ledger,
        Op::Count {
            threshold: today.to_string(),
        },
        Op::Stats,
    ];
    ops.into_iter().enumerate().map(|(i, op)| (i + 1, op)).collect()
}

pub async fn execute<Q: TaskQueue + ?Sized>(
    queue: &Q,
    op: Op,
    thresholds: ThresholdDates,
) -> Result<Outcome> {
    let outcome = match op {
        Op::Enqueue(task) => {
            let id = task.id;
            let handle = queue.enqueue(task).await;
            Outcome::Enqueue { id, handle }
        }
        Op::Dequeue => Outcome::Dequeue {
            task: queue.dequeue_highest_priority().await,
        },
        Op::Find { id } => Outcome::Find {
            id,
            task: queue.find_by_id(id).await,
        },
        Op::Reorder { key } => {
            let key: SortKey = key.parse()?;
            queue.reorder(key).await;
            Outcome::Reorder { key }
        }
        Op::Count { threshold } => {
            let threshold = thresholds.parse(&threshold)?;
            let count = queue.count_by_submission_threshold(threshold).await;
            Outcome::Count { threshold, count }
        }
        Op::List => Outcome::List {
            tasks: queue.snapshot().await,
        },
        Op::Ledger => Outcome::Ledger {
            tasks: queue.ledger_snapshot().await,
        },
        Op::Stats => Outcome::Stats(queue.counts().await),
    };
    Ok(outcome)
}

fn write_tasks(f: &mut fmt::Formatter<'_>, heading: &str, tasks: &[Task]) -> fmt::Result {
    if tasks.is_empty() {
        return write!(f, "{heading}: empty");
    }
    write!(f, "{heading}:")?;
    for task in tasks {
        write!(f, "\n  {task}")?;
    }
    Ok(())
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Enqueue { id, handle } => write!(f, "Enqueued task {id} ({handle})"),
            Outcome::Dequeue { task: Some(task) } => {
                write!(f, "Dequeued Task ID: {}, Priority: {}", task.id(), task.priority())
            }
            Outcome::Dequeue { task: None } => write!(f, "Queue is empty!"),
            Outcome::Find { task: Some(task), .. } => {
                write!(f, "Found Task ID: {}, Owner: {}", task.id(), task.owner())
            }
            Outcome::Find { id, task: None } => write!(f, "Task {id} not found!"),
            Outcome::Reorder { key } => write!(f, "Ledger sorted by {key}"),
            Outcome::Count { threshold, count } => {
                write!(f, "Tasks submitted on or before {threshold}: {count}")
            }
            Outcome::List { tasks } => write_tasks(f, "Tasks in queue", tasks),
            Outcome::Ledger { tasks } => write_tasks(f, "Tasks in ledger", tasks),
            Outcome::Stats(counts) => write!(
                f,
                "Ledger: {}, queued: {}, dispatched: {}",
                counts.ledger, counts.queued, counts.dispatched
            ),
        }
    }
}
