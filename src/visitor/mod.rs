//! 节点访问器模块
//!
//! 基于遍历引擎实现的具体访问器：列收集、节点查找、常量折叠。
//! 每个访问器只持有自己的累计状态，树的借用完全交给遍历引擎。

mod collect_columns_visitor;
mod find_node_visitor;
mod fold_constant_visitor;

pub use collect_columns_visitor::CollectColumnsVisitor;
pub use find_node_visitor::{FindNodeVisitor, NodeMatcher};
pub use fold_constant_visitor::{FoldConstantVisitor, FoldError};
