//! Ports - 抽象化レイヤー
//!
//! 外部から差し替えたい依存（時刻）と、ロック付きストアへの非同期
//! インターフェースを trait として定義する。

pub mod clock;
pub mod task_queue;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::task_queue::TaskQueue;
