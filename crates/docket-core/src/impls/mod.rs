//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **SharedTaskStore**: `TaskStore` を 1 つの Mutex で包んだ `TaskQueue`

pub mod shared_store;

pub use self::shared_store::SharedTaskStore;
