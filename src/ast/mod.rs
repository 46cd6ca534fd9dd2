//! 查询 AST 模块
//!
//! 基于枚举的封闭节点目录、槽位/列表容器、SELECT 语句与节点工厂。

// 基础类型定义
pub mod types;
pub use types::*;

// 槽位与列表
pub mod list;
pub use list::*;

// 节点目录
pub mod node;
pub use node::*;

// 语句定义
pub mod stmt;
pub use stmt::*;

// 节点工厂
pub mod factory;
pub use factory::*;
