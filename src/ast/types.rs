//! 节点辅助枚举
//!
//! 各类节点携带的判别字段：操作符、逻辑连接词、连接方式、排序方向、
//! 填充模式等。与节点结构体分离，便于工厂与折叠等流程单独引用。

use serde::{Deserialize, Serialize};

/// 操作符类型
///
/// 一元与二元操作符共用 `OperatorNode`，一元操作符只占用 `left` 槽位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorType {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    /// 一元取负
    Minus,
    GreaterThan,
    GreaterEqual,
    LowerThan,
    LowerEqual,
    Equal,
    NotEqual,
    Like,
    NotLike,
    In,
    NotIn,
}

impl OperatorType {
    /// 是否为一元操作符
    pub fn is_unary(self) -> bool {
        matches!(self, OperatorType::Minus)
    }

    /// 是否为二元操作符
    pub fn is_binary(self) -> bool {
        !self.is_unary()
    }
}

/// 逻辑条件连接词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicConditionType {
    And,
    Or,
    Not,
}

/// 表连接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// NULL 值在排序结果中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullOrder {
    /// 按排序方向的默认位置
    Default,
    First,
    Last,
}

/// 窗口空洞的填充模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillMode {
    None,
    Value,
    Prev,
    Null,
    Linear,
    Next,
}

/// 分组集类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupingSetType {
    Normal,
}
