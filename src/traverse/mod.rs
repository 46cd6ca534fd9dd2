//! 遍历引擎
//!
//! 前序/后序可配置的只读遍历与槽位改写遍历，以及 SELECT 语句的子句
//! 级联遍历。引擎自身无状态、无锁、不做 I/O：同一棵树上的并发遍历由
//! 调用方通过借用规则静态串行化；提前终止只有一条途径，即回调返回
//! [`WalkControl::Error`] 或 [`WalkControl::End`]。

// 控制类型
pub mod control;
pub use control::*;

// 只读遍历
pub mod walk;
pub use walk::*;

// 改写遍历
pub mod rewrite;
pub use rewrite::*;

// 子句级联遍历
pub mod clause;
pub use clause::*;
