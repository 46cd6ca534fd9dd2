//! 节点工厂
//!
//! 各类节点的构造入口。涉及名称长度、字面量格式校验的构造返回
//! `NodeResult`，其余直接返回节点。遍历引擎自身从不构造节点，
//! 只搬动已有节点。

use super::list::{NodeList, NodeSlot};
use super::node::{
    ColumnNode, FillNode, FunctionNode, GroupingSetNode, IntervalWindowNode, IsNullCondNode,
    JoinTableNode, LimitNode, LogicConditionNode, Node, NodeListNode, OperatorNode,
    OrderByExprNode, RawExprNode, RealTableNode, SessionWindowNode, StateWindowNode, TargetNode,
    TempTableNode, ValueNode,
};
use super::stmt::SelectStmt;
use super::types::{FillMode, JoinType, LogicConditionType, NullOrder, OperatorType, SortOrder};
use crate::core::{NodeError, NodeResult, TimeUnit, Value};

/// 数据库名最大字节长度
pub const MAX_DB_NAME_LEN: usize = 64;
/// 表名最大字节长度
pub const MAX_TABLE_NAME_LEN: usize = 192;
/// 列名最大字节长度
pub const MAX_COLUMN_NAME_LEN: usize = 64;

fn check_db_name(name: &str) -> NodeResult<()> {
    if name.len() > MAX_DB_NAME_LEN {
        return Err(NodeError::DbNameTooLong(name.to_string()));
    }
    Ok(())
}

fn check_table_name(name: &str) -> NodeResult<()> {
    if name.len() > MAX_TABLE_NAME_LEN {
        return Err(NodeError::TableNameTooLong(name.to_string()));
    }
    Ok(())
}

fn check_column_name(name: &str) -> NodeResult<()> {
    if name.len() > MAX_COLUMN_NAME_LEN {
        return Err(NodeError::ColumnNameTooLong(name.to_string()));
    }
    Ok(())
}

/// 构造列引用节点，校验表限定名与列名长度
pub fn create_column_node(table_name: Option<String>, col_name: String) -> NodeResult<Node> {
    if let Some(table) = &table_name {
        check_table_name(table)?;
    }
    check_column_name(&col_name)?;
    Ok(Node::Column(ColumnNode::new(table_name, col_name)))
}

/// 构造字面量节点
pub fn create_value_node(value: Value) -> Node {
    Node::Value(ValueNode::new(value))
}

/// 从时长字面量（如 `10m`、`500a`）构造字面量节点
///
/// 格式为十进制数字加单位后缀（`a`/`s`/`m`/`h`/`d`/`w`），
/// 格式不符或数值溢出均报 [`NodeError::InvalidDurationLiteral`]。
pub fn create_duration_value_node(literal: &str) -> NodeResult<Node> {
    let (value, unit) = parse_duration_literal(literal)?;
    Ok(create_value_node(Value::Duration { value, unit }))
}

fn parse_duration_literal(literal: &str) -> NodeResult<(i64, TimeUnit)> {
    let trimmed = literal.trim();
    let suffix = match trimmed.chars().last() {
        Some(c) => c,
        None => return Err(NodeError::InvalidDurationLiteral(literal.to_string())),
    };
    let unit = match TimeUnit::from_suffix(suffix) {
        Some(u) => u,
        None => return Err(NodeError::InvalidDurationLiteral(literal.to_string())),
    };
    let digits = &trimmed[..trimmed.len() - suffix.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NodeError::InvalidDurationLiteral(literal.to_string()));
    }
    let value = digits
        .parse::<i64>()
        .map_err(|_| NodeError::InvalidDurationLiteral(literal.to_string()))?;
    Ok((value, unit))
}

/// 构造操作符节点，一元操作符将 `right` 传 `None`
pub fn create_operator_node(
    op_type: OperatorType,
    left: Option<Node>,
    right: Option<Node>,
) -> Node {
    Node::Operator(OperatorNode::new(
        op_type,
        NodeSlot::from(left),
        NodeSlot::from(right),
    ))
}

/// 构造逻辑条件节点，`NOT` 只带一个参数
pub fn create_logic_condition_node(
    cond_type: LogicConditionType,
    param1: Node,
    param2: Option<Node>,
) -> Node {
    let mut parameters = NodeList::new();
    parameters.push(param1);
    if let Some(param2) = param2 {
        parameters.push(param2);
    }
    Node::LogicCondition(LogicConditionNode::new(cond_type, parameters))
}

/// BETWEEN 脱糖：`AND(expr >= lower, expr <= upper)`
///
/// 探针表达式克隆进两个比较分支，两棵子树互不共享。
pub fn create_between_and(expr: Node, lower: Node, upper: Node) -> Node {
    let ge = create_operator_node(OperatorType::GreaterEqual, Some(expr.clone()), Some(lower));
    let le = create_operator_node(OperatorType::LowerEqual, Some(expr), Some(upper));
    create_logic_condition_node(LogicConditionType::And, ge, Some(le))
}

/// NOT BETWEEN 脱糖：`OR(expr < lower, expr > upper)`
pub fn create_not_between_and(expr: Node, lower: Node, upper: Node) -> Node {
    let lt = create_operator_node(OperatorType::LowerThan, Some(expr.clone()), Some(lower));
    let gt = create_operator_node(OperatorType::GreaterThan, Some(expr), Some(upper));
    create_logic_condition_node(LogicConditionType::Or, lt, Some(gt))
}

/// 构造 IS NULL / IS NOT NULL 条件节点
pub fn create_is_null_cond_node(expr: Node, is_null: bool) -> Node {
    Node::IsNullCond(IsNullCondNode::new(NodeSlot::new(expr), is_null))
}

/// 构造函数调用节点
pub fn create_function_node(function_name: String, parameters: NodeList) -> Node {
    Node::Function(FunctionNode::new(function_name, parameters))
}

/// 构造列表包装节点
pub fn create_node_list_node(node_list: NodeList) -> Node {
    Node::List(NodeListNode::new(node_list))
}

/// 构造分组集节点
pub fn create_grouping_set_node(parameters: NodeList) -> Node {
    Node::GroupingSet(GroupingSetNode::new(parameters))
}

/// 构造物理表引用节点，校验库名与表名长度
pub fn create_real_table_node(
    db_name: Option<String>,
    table_name: String,
    table_alias: Option<String>,
) -> NodeResult<Node> {
    if let Some(db) = &db_name {
        check_db_name(db)?;
    }
    check_table_name(&table_name)?;
    Ok(Node::RealTable(RealTableNode::new(
        db_name,
        table_name,
        table_alias,
    )))
}

/// 构造子查询表节点
pub fn create_temp_table_node(subquery: SelectStmt, table_alias: Option<String>) -> Node {
    Node::TempTable(TempTableNode::new(subquery, table_alias))
}

/// 构造表连接节点
pub fn create_join_table_node(
    join_type: JoinType,
    left: Node,
    right: Node,
    on_cond: Option<Node>,
) -> Node {
    Node::JoinTable(JoinTableNode::new(
        join_type,
        NodeSlot::new(left),
        NodeSlot::new(right),
        NodeSlot::from(on_cond),
    ))
}

/// 构造 LIMIT 子句节点
pub fn create_limit_node(limit: i64, offset: i64) -> Node {
    Node::Limit(LimitNode::new(limit, offset))
}

/// 构造排序表达式节点
pub fn create_order_by_expr_node(expr: Node, order: SortOrder, null_order: NullOrder) -> Node {
    Node::OrderByExpr(OrderByExprNode::new(NodeSlot::new(expr), order, null_order))
}

/// 构造会话窗口节点
pub fn create_session_window_node(col: Node, gap: Node) -> Node {
    Node::SessionWindow(SessionWindowNode::new(NodeSlot::new(col), NodeSlot::new(gap)))
}

/// 构造状态窗口节点，状态表达式槽位由绑定阶段填充
pub fn create_state_window_node(col: Node) -> Node {
    Node::StateWindow(StateWindowNode::new(NodeSlot::empty(), NodeSlot::new(col)))
}

/// 构造时间间隔窗口节点，窗口列槽位由绑定阶段填充
pub fn create_interval_window_node(
    interval: Node,
    offset: Option<Node>,
    sliding: Option<Node>,
    fill: Option<Node>,
) -> Node {
    Node::IntervalWindow(IntervalWindowNode::new(
        NodeSlot::new(interval),
        NodeSlot::from(offset),
        NodeSlot::from(sliding),
        NodeSlot::from(fill),
        NodeSlot::empty(),
    ))
}

/// 构造填充说明节点
pub fn create_fill_node(mode: FillMode, values: Option<Node>) -> Node {
    Node::Fill(FillNode::new(mode, NodeSlot::from(values)))
}

/// 构造原始表达式包装节点
pub fn create_raw_expr_node(text: String, expr: Node) -> Node {
    Node::RawExpr(RawExprNode::new(text, NodeSlot::new(expr)))
}

/// 构造输出绑定节点
pub fn create_target_node(data_block_id: i16, slot_id: i16, expr: Node) -> Node {
    Node::Target(TargetNode::new(data_block_id, slot_id, NodeSlot::new(expr)))
}

/// 为投影表达式设置别名
///
/// 只有携带别名字段的表达式节点类别生效，返回是否设置成功。
pub fn set_projection_alias(node: &mut Node, alias: String) -> bool {
    match node {
        Node::Column(col) => {
            col.alias = Some(alias);
            true
        }
        Node::Value(val) => {
            val.alias = Some(alias);
            true
        }
        Node::Operator(op) => {
            op.alias = Some(alias);
            true
        }
        Node::Function(func) => {
            func.alias = Some(alias);
            true
        }
        _ => false,
    }
}
