//! 查询 AST 节点目录
//!
//! 基于枚举的封闭节点集：每类节点一个 variant，variant 内是具名结构体。
//! 节点通过 [`NodeSlot`] / [`NodeList`] 持有子节点，形成严格的树（无共享、
//! 无环）。节点的类别在生命周期内不变，遍历与改写只会变更槽位内容。

use super::list::{NodeList, NodeSlot};
use super::stmt::SelectStmt;
use super::types::{
    FillMode, GroupingSetType, JoinType, LogicConditionType, NullOrder, OperatorType, SortOrder,
};
use crate::core::{NodeResult, Value};
use serde::{Deserialize, Serialize};

/// 节点类别判别值，与 [`Node`] 的 variant 一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Column,
    Value,
    Operator,
    LogicCondition,
    IsNullCond,
    Function,
    RealTable,
    TempTable,
    JoinTable,
    GroupingSet,
    OrderByExpr,
    Limit,
    StateWindow,
    SessionWindow,
    IntervalWindow,
    List,
    Fill,
    RawExpr,
    Target,
}

/// AST 节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Column(ColumnNode),
    Value(ValueNode),
    Operator(OperatorNode),
    LogicCondition(LogicConditionNode),
    IsNullCond(IsNullCondNode),
    Function(FunctionNode),
    RealTable(RealTableNode),
    TempTable(TempTableNode),
    JoinTable(JoinTableNode),
    GroupingSet(GroupingSetNode),
    OrderByExpr(OrderByExprNode),
    Limit(LimitNode),
    StateWindow(StateWindowNode),
    SessionWindow(SessionWindowNode),
    IntervalWindow(IntervalWindowNode),
    List(NodeListNode),
    Fill(FillNode),
    RawExpr(RawExprNode),
    Target(TargetNode),
}

impl Node {
    /// 节点类别
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Column(_) => NodeKind::Column,
            Node::Value(_) => NodeKind::Value,
            Node::Operator(_) => NodeKind::Operator,
            Node::LogicCondition(_) => NodeKind::LogicCondition,
            Node::IsNullCond(_) => NodeKind::IsNullCond,
            Node::Function(_) => NodeKind::Function,
            Node::RealTable(_) => NodeKind::RealTable,
            Node::TempTable(_) => NodeKind::TempTable,
            Node::JoinTable(_) => NodeKind::JoinTable,
            Node::GroupingSet(_) => NodeKind::GroupingSet,
            Node::OrderByExpr(_) => NodeKind::OrderByExpr,
            Node::Limit(_) => NodeKind::Limit,
            Node::StateWindow(_) => NodeKind::StateWindow,
            Node::SessionWindow(_) => NodeKind::SessionWindow,
            Node::IntervalWindow(_) => NodeKind::IntervalWindow,
            Node::List(_) => NodeKind::List,
            Node::Fill(_) => NodeKind::Fill,
            Node::RawExpr(_) => NodeKind::RawExpr,
            Node::Target(_) => NodeKind::Target,
        }
    }

    /// 是否为表达式节点（可出现在投影、过滤条件等表达式位置）
    pub fn is_expr(&self) -> bool {
        matches!(
            self,
            Node::Column(_)
                | Node::Value(_)
                | Node::Operator(_)
                | Node::LogicCondition(_)
                | Node::IsNullCond(_)
                | Node::Function(_)
                | Node::RawExpr(_)
        )
    }

    /// 序列化为 JSON 文本
    pub fn to_json(&self) -> NodeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 从 JSON 文本反序列化
    pub fn from_json(text: &str) -> NodeResult<Node> {
        Ok(serde_json::from_str(text)?)
    }
}

/// 列引用节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnNode {
    pub table_name: Option<String>,
    pub col_name: String,
    pub alias: Option<String>,
}

impl ColumnNode {
    pub fn new(table_name: Option<String>, col_name: String) -> Self {
        Self {
            table_name,
            col_name,
            alias: None,
        }
    }

    /// 带表限定的列名，如 `d1.voltage`；无限定时即列名本身
    pub fn qualified_name(&self) -> String {
        match &self.table_name {
            Some(table) => format!("{}.{}", table, self.col_name),
            None => self.col_name.clone(),
        }
    }
}

/// 字面量节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueNode {
    pub value: Value,
    pub alias: Option<String>,
}

impl ValueNode {
    pub fn new(value: Value) -> Self {
        Self { value, alias: None }
    }
}

/// 操作符节点，一元操作符只占用 `left` 槽位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorNode {
    pub op_type: OperatorType,
    pub left: NodeSlot,
    pub right: NodeSlot,
    pub alias: Option<String>,
}

impl OperatorNode {
    pub fn new(op_type: OperatorType, left: NodeSlot, right: NodeSlot) -> Self {
        Self {
            op_type,
            left,
            right,
            alias: None,
        }
    }
}

/// 逻辑条件节点，参数列表按书写顺序持有各子条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicConditionNode {
    pub cond_type: LogicConditionType,
    pub parameters: NodeList,
}

impl LogicConditionNode {
    pub fn new(cond_type: LogicConditionType, parameters: NodeList) -> Self {
        Self {
            cond_type,
            parameters,
        }
    }
}

/// IS NULL / IS NOT NULL 条件节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsNullCondNode {
    pub expr: NodeSlot,
    pub is_null: bool,
}

impl IsNullCondNode {
    pub fn new(expr: NodeSlot, is_null: bool) -> Self {
        Self { expr, is_null }
    }
}

/// 函数调用节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub function_name: String,
    pub parameters: NodeList,
    pub alias: Option<String>,
}

impl FunctionNode {
    pub fn new(function_name: String, parameters: NodeList) -> Self {
        Self {
            function_name,
            parameters,
            alias: None,
        }
    }
}

/// 物理表引用节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealTableNode {
    pub db_name: Option<String>,
    pub table_name: String,
    pub table_alias: Option<String>,
}

impl RealTableNode {
    pub fn new(db_name: Option<String>, table_name: String, table_alias: Option<String>) -> Self {
        Self {
            db_name,
            table_name,
            table_alias,
        }
    }
}

/// 子查询表节点
///
/// 表达式遍历不下钻子查询语句。
/// TODO: 支持语句级节点后，在调度表中下钻 `subquery` 的各子句。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempTableNode {
    pub subquery: Box<SelectStmt>,
    pub table_alias: Option<String>,
}

impl TempTableNode {
    pub fn new(subquery: SelectStmt, table_alias: Option<String>) -> Self {
        Self {
            subquery: Box::new(subquery),
            table_alias,
        }
    }
}

/// 表连接节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTableNode {
    pub join_type: JoinType,
    pub left: NodeSlot,
    pub right: NodeSlot,
    pub on_cond: NodeSlot,
}

impl JoinTableNode {
    pub fn new(join_type: JoinType, left: NodeSlot, right: NodeSlot, on_cond: NodeSlot) -> Self {
        Self {
            join_type,
            left,
            right,
            on_cond,
        }
    }
}

/// 分组集节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSetNode {
    pub grouping_set_type: GroupingSetType,
    pub parameters: NodeList,
}

impl GroupingSetNode {
    pub fn new(parameters: NodeList) -> Self {
        Self {
            grouping_set_type: GroupingSetType::Normal,
            parameters,
        }
    }
}

/// 排序表达式节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByExprNode {
    pub expr: NodeSlot,
    pub order: SortOrder,
    pub null_order: NullOrder,
}

impl OrderByExprNode {
    pub fn new(expr: NodeSlot, order: SortOrder, null_order: NullOrder) -> Self {
        Self {
            expr,
            order,
            null_order,
        }
    }
}

/// LIMIT 子句节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitNode {
    pub limit: i64,
    pub offset: i64,
}

impl LimitNode {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

/// 状态窗口节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateWindowNode {
    pub expr: NodeSlot,
    pub col: NodeSlot,
}

impl StateWindowNode {
    pub fn new(expr: NodeSlot, col: NodeSlot) -> Self {
        Self { expr, col }
    }
}

/// 会话窗口节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionWindowNode {
    pub col: NodeSlot,
    pub gap: NodeSlot,
}

impl SessionWindowNode {
    pub fn new(col: NodeSlot, gap: NodeSlot) -> Self {
        Self { col, gap }
    }
}

/// 时间间隔窗口节点
///
/// 子槽位的下钻顺序固定为 interval、offset、sliding、fill、col。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalWindowNode {
    pub interval: NodeSlot,
    pub offset: NodeSlot,
    pub sliding: NodeSlot,
    pub fill: NodeSlot,
    pub col: NodeSlot,
}

impl IntervalWindowNode {
    pub fn new(
        interval: NodeSlot,
        offset: NodeSlot,
        sliding: NodeSlot,
        fill: NodeSlot,
        col: NodeSlot,
    ) -> Self {
        Self {
            interval,
            offset,
            sliding,
            fill,
            col,
        }
    }
}

/// 列表包装节点，把一个节点列表当作单个节点持有
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeListNode {
    pub node_list: NodeList,
}

impl NodeListNode {
    pub fn new(node_list: NodeList) -> Self {
        Self { node_list }
    }
}

/// 填充说明节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillNode {
    pub mode: FillMode,
    pub values: NodeSlot,
}

impl FillNode {
    pub fn new(mode: FillMode, values: NodeSlot) -> Self {
        Self { mode, values }
    }
}

/// 原始表达式包装节点，语法分析的中间产物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExprNode {
    /// 源文本片段
    pub text: String,
    pub expr: NodeSlot,
}

impl RawExprNode {
    pub fn new(text: String, expr: NodeSlot) -> Self {
        Self { text, expr }
    }
}

/// 输出绑定节点，把表达式绑定到数据块中的槽
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetNode {
    pub data_block_id: i16,
    pub slot_id: i16,
    pub expr: NodeSlot,
}

impl TargetNode {
    pub fn new(data_block_id: i16, slot_id: i16, expr: NodeSlot) -> Self {
        Self {
            data_block_id,
            slot_id,
            expr,
        }
    }
}
