//! docket-core
//!
//! Priority task store: a ledger of every task ever submitted plus a
//! dispatch queue ordered by priority, kept consistent behind one API.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Task, TaskId, Handle, SubmissionDate, errors）
//! - **ports**: 抽象化レイヤー（Clock, TaskQueue）
//! - **store**: 同期・単一スレッドの TaskStore（ledger + priority queue）
//! - **impls**: ports の実装（SharedTaskStore）
//! - **config**: TOML 設定
//! - **observability**: StoreCounts

pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod store;

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
pub use domain::{
    DateError, DateZone, Handle, NewTask, StoreError, SubmissionDate, Task, TaskId, TaskStatus,
    ThresholdDates,
};
pub use impls::SharedTaskStore;
pub use observability::StoreCounts;
pub use ports::{Clock, FixedClock, SystemClock, TaskQueue};
pub use store::{SortKey, TaskStore};
