//! Domain model (tasks, identifiers, dates, errors).

pub mod date;
pub mod errors;
pub mod ids;
pub mod task;

pub use date::{DateError, DateZone, SubmissionDate, ThresholdDates};
pub use errors::StoreError;
pub use ids::{Handle, TaskId};
pub use task::{NewTask, Task, TaskStatus};
