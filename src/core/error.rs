//! 节点层统一错误处理
//!
//! ## 设计理念
//!
//! 1. **按需设计**：节点层错误成因少（名称校验、字面量解析、序列化），
//!    使用单一枚举即可，无需结构化错误链
//! 2. **分层转换**：外部错误（serde_json）通过自定义 `From` 实现转换为
//!    字符串，降低模块耦合
//! 3. **统一接口**：`NodeResult<T>` 提供统一的返回类型，简化错误传播
//!
//! 遍历引擎本身不产生 `NodeError`：回调的提前终止通过
//! `traverse::WalkControl` 表达，与错误类型是两个独立的通道。

use thiserror::Error;

/// 节点层统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("数据库名过长: {0}")]
    DbNameTooLong(String),

    #[error("表名过长: {0}")]
    TableNameTooLong(String),

    #[error("列名过长: {0}")]
    ColumnNameTooLong(String),

    #[error("无效的时长字面量: {0}")]
    InvalidDurationLiteral(String),

    #[error("序列化错误: {0}")]
    Serialization(String),
}

/// 统一的结果类型
pub type NodeResult<T> = Result<T, NodeError>;

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::Serialization(err.to_string())
    }
}
