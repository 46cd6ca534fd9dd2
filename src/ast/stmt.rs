//! SELECT 语句
//!
//! 语句不是 [`Node`]：表达式遍历与语句级子句遍历是两个入口，
//! 子句级联遍历见 `traverse::clause`。

use super::list::{NodeList, NodeSlot};
use super::node::Node;
use crate::core::NodeResult;
use serde::{Deserialize, Serialize};

/// SELECT 语句的子句类别
///
/// 声明顺序即级联遍历顺序：以某个子句为截止时，按此顺序访问排在它
/// 之前（含它自身）的全部子句。`Ord` 派生依赖该声明顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SqlClause {
    From,
    Where,
    PartitionBy,
    Window,
    GroupBy,
    Having,
    Distinct,
    OrderBy,
    Projection,
}

impl SqlClause {
    /// 级联遍历顺序中的全部子句
    pub const ALL: [SqlClause; 9] = [
        SqlClause::From,
        SqlClause::Where,
        SqlClause::PartitionBy,
        SqlClause::Window,
        SqlClause::GroupBy,
        SqlClause::Having,
        SqlClause::Distinct,
        SqlClause::OrderBy,
        SqlClause::Projection,
    ];
}

/// SELECT 语句
///
/// `slimit` / `limit` 不参与子句级联遍历。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    pub distinct: bool,
    /// 投影列表为空时置位，表示 `SELECT *`
    pub is_star: bool,
    pub projections: NodeList,
    pub from: NodeSlot,
    pub where_clause: NodeSlot,
    pub partition_by: NodeList,
    pub window: NodeSlot,
    pub group_by: NodeList,
    pub having: NodeSlot,
    pub order_by: NodeList,
    pub slimit: NodeSlot,
    pub limit: NodeSlot,
}

impl SelectStmt {
    pub fn new(distinct: bool, projections: NodeList, from: Option<Node>) -> Self {
        let is_star = projections.is_empty();
        Self {
            distinct,
            is_star,
            projections,
            from: NodeSlot::from(from),
            where_clause: NodeSlot::empty(),
            partition_by: NodeList::new(),
            window: NodeSlot::empty(),
            group_by: NodeList::new(),
            having: NodeSlot::empty(),
            order_by: NodeList::new(),
            slimit: NodeSlot::empty(),
            limit: NodeSlot::empty(),
        }
    }

    pub fn with_where(mut self, cond: Node) -> Self {
        self.where_clause = NodeSlot::new(cond);
        self
    }

    pub fn with_partition_by(mut self, partition_by: NodeList) -> Self {
        self.partition_by = partition_by;
        self
    }

    pub fn with_window(mut self, window: Node) -> Self {
        self.window = NodeSlot::new(window);
        self
    }

    pub fn with_group_by(mut self, group_by: NodeList) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_having(mut self, cond: Node) -> Self {
        self.having = NodeSlot::new(cond);
        self
    }

    pub fn with_order_by(mut self, order_by: NodeList) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn with_slimit(mut self, slimit: Node) -> Self {
        self.slimit = NodeSlot::new(slimit);
        self
    }

    pub fn with_limit(mut self, limit: Node) -> Self {
        self.limit = NodeSlot::new(limit);
        self
    }

    /// 序列化为 JSON 文本
    pub fn to_json(&self) -> NodeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从 JSON 文本反序列化
    pub fn from_json(text: &str) -> NodeResult<SelectStmt> {
        Ok(serde_json::from_str(text)?)
    }
}
