//! 只读遍历
//!
//! 按前序或后序深入表达式树，对每个节点调用访问回调。回调返回
//! [`WalkControl::Error`] / [`WalkControl::End`] 时整棵树的遍历立即短路，
//! 外层兄弟节点同样不再访问。空树、空列表是合法输入，返回
//! [`WalkControl::Continue`] 且回调不被调用。
//!
//! 访问回调无独立上下文参数，调用方状态由闭包捕获。

use super::control::{TraverseOrder, WalkControl, MAX_WALK_DEPTH};
use crate::ast::{Node, NodeList, NodeSlot};

/// 按给定次序遍历一棵表达式树
pub fn walk_node<F>(node: Option<&Node>, order: TraverseOrder, visitor: &mut F) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_node_at(node, order, visitor, 0)
}

/// 按给定次序逐元素遍历节点列表
///
/// 第 `i` 个元素产生终止结果时，总回调次数恰为前 `i+1` 个元素的遍历量，
/// 其后元素不再访问。
pub fn walk_list<F>(list: &NodeList, order: TraverseOrder, visitor: &mut F) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_list_at(list, order, visitor, 0)
}

/// 前序遍历表达式树
pub fn walk_expr<F>(node: Option<&Node>, visitor: &mut F) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_node(node, TraverseOrder::Pre, visitor)
}

/// 前序遍历表达式列表
pub fn walk_exprs<F>(list: &NodeList, visitor: &mut F) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_list(list, TraverseOrder::Pre, visitor)
}

/// 后序遍历表达式树
pub fn walk_expr_post_order<F>(node: Option<&Node>, visitor: &mut F) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_node(node, TraverseOrder::Post, visitor)
}

/// 后序遍历表达式列表
pub fn walk_exprs_post_order<F>(list: &NodeList, visitor: &mut F) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_list(list, TraverseOrder::Post, visitor)
}

fn walk_node_at<F>(
    node: Option<&Node>,
    order: TraverseOrder,
    visitor: &mut F,
    depth: usize,
) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    let node = match node {
        Some(node) => node,
        None => return WalkControl::Continue,
    };
    if depth >= MAX_WALK_DEPTH {
        log::error!("表达式树深度超过上限 {}, 中止遍历", MAX_WALK_DEPTH);
        return WalkControl::Error;
    }

    if order == TraverseOrder::Pre {
        let res = visitor(node);
        if res.is_terminal() {
            return res;
        }
    }

    let res = walk_children(node, order, visitor, depth);

    if order == TraverseOrder::Post && !res.is_terminal() {
        return visitor(node);
    }
    res
}

fn walk_slot_at<F>(
    slot: &NodeSlot,
    order: TraverseOrder,
    visitor: &mut F,
    depth: usize,
) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    walk_node_at(slot.get(), order, visitor, depth)
}

fn walk_list_at<F>(
    list: &NodeList,
    order: TraverseOrder,
    visitor: &mut F,
    depth: usize,
) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    for slot in list.slots() {
        let res = walk_node_at(slot.get(), order, visitor, depth);
        if res.is_terminal() {
            return res;
        }
    }
    WalkControl::Continue
}

/// 调度表：每类节点按固定的声明顺序下钻其子槽位
///
/// 对节点类别穷尽匹配，不设默认分支；新增节点类别时编译器会强制
/// 在此补充调度项。多槽位类别从左到右短路下钻。
fn walk_children<F>(node: &Node, order: TraverseOrder, visitor: &mut F, depth: usize) -> WalkControl
where
    F: FnMut(&Node) -> WalkControl,
{
    let depth = depth + 1;
    match node {
        // 以下类别没有子节点
        Node::Column(_) | Node::Value(_) | Node::RealTable(_) | Node::Limit(_) => {
            WalkControl::Continue
        }
        // 子查询语句暂不下钻，见 TempTableNode
        Node::TempTable(_) => WalkControl::Continue,
        Node::Operator(op) => {
            let mut res = walk_slot_at(&op.left, order, visitor, depth);
            if !res.is_terminal() {
                res = walk_slot_at(&op.right, order, visitor, depth);
            }
            res
        }
        Node::LogicCondition(cond) => walk_list_at(&cond.parameters, order, visitor, depth),
        Node::IsNullCond(cond) => walk_slot_at(&cond.expr, order, visitor, depth),
        Node::Function(func) => walk_list_at(&func.parameters, order, visitor, depth),
        Node::JoinTable(join) => {
            let mut res = walk_slot_at(&join.left, order, visitor, depth);
            if !res.is_terminal() {
                res = walk_slot_at(&join.right, order, visitor, depth);
            }
            if !res.is_terminal() {
                res = walk_slot_at(&join.on_cond, order, visitor, depth);
            }
            res
        }
        Node::GroupingSet(set) => walk_list_at(&set.parameters, order, visitor, depth),
        Node::OrderByExpr(order_by) => walk_slot_at(&order_by.expr, order, visitor, depth),
        Node::StateWindow(state) => {
            let mut res = walk_slot_at(&state.expr, order, visitor, depth);
            if !res.is_terminal() {
                res = walk_slot_at(&state.col, order, visitor, depth);
            }
            res
        }
        Node::SessionWindow(session) => {
            let mut res = walk_slot_at(&session.col, order, visitor, depth);
            if !res.is_terminal() {
                res = walk_slot_at(&session.gap, order, visitor, depth);
            }
            res
        }
        Node::IntervalWindow(window) => {
            let mut res = walk_slot_at(&window.interval, order, visitor, depth);
            if !res.is_terminal() {
                res = walk_slot_at(&window.offset, order, visitor, depth);
            }
            if !res.is_terminal() {
                res = walk_slot_at(&window.sliding, order, visitor, depth);
            }
            if !res.is_terminal() {
                res = walk_slot_at(&window.fill, order, visitor, depth);
            }
            if !res.is_terminal() {
                res = walk_slot_at(&window.col, order, visitor, depth);
            }
            res
        }
        Node::List(list) => walk_list_at(&list.node_list, order, visitor, depth),
        Node::Fill(fill) => walk_slot_at(&fill.values, order, visitor, depth),
        Node::RawExpr(raw) => walk_slot_at(&raw.expr, order, visitor, depth),
        Node::Target(target) => walk_slot_at(&target.expr, order, visitor, depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        create_between_and, create_column_node, create_fill_node, create_operator_node,
        create_raw_expr_node, create_value_node, FillMode, IntervalWindowNode, OperatorType,
    };
    use crate::core::{TimeUnit, Value};

    fn col(name: &str) -> Node {
        create_column_node(None, name.to_string()).expect("合法列名")
    }

    fn int(v: i64) -> Node {
        create_value_node(Value::Int(v))
    }

    fn dur(value: i64, unit: TimeUnit) -> Node {
        create_value_node(Value::Duration { value, unit })
    }

    /// 节点的测试标签：叶子取内容，其余取类别
    fn label(node: &Node) -> String {
        match node {
            Node::Column(col) => col.col_name.clone(),
            Node::Value(val) => val.value.to_string(),
            Node::Operator(op) => format!("{:?}", op.op_type),
            Node::LogicCondition(cond) => format!("{:?}", cond.cond_type),
            other => format!("{:?}", other.kind()),
        }
    }

    fn collect_labels(node: &Node, order: TraverseOrder) -> (Vec<String>, WalkControl) {
        let mut labels = Vec::new();
        let res = walk_node(Some(node), order, &mut |n| {
            labels.push(label(n));
            WalkControl::Continue
        });
        (labels, res)
    }

    #[test]
    fn test_pre_order_sequence() {
        let tree = create_between_and(col("voltage"), int(200), int(240));
        let (labels, res) = collect_labels(&tree, TraverseOrder::Pre);
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(
            labels,
            vec![
                "And",
                "GreaterEqual",
                "voltage",
                "200",
                "LowerEqual",
                "voltage",
                "240"
            ]
        );
    }

    #[test]
    fn test_post_order_sequence() {
        let tree = create_between_and(col("voltage"), int(200), int(240));
        let (labels, res) = collect_labels(&tree, TraverseOrder::Post);
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(
            labels,
            vec![
                "voltage",
                "200",
                "GreaterEqual",
                "voltage",
                "240",
                "LowerEqual",
                "And"
            ]
        );
    }

    #[test]
    fn test_interval_window_child_order() {
        let window = Node::IntervalWindow(IntervalWindowNode::new(
            NodeSlot::new(dur(10, TimeUnit::Minute)),
            NodeSlot::new(dur(1, TimeUnit::Minute)),
            NodeSlot::new(dur(5, TimeUnit::Minute)),
            NodeSlot::new(create_fill_node(FillMode::Prev, None)),
            NodeSlot::new(col("ts")),
        ));
        let (labels, _) = collect_labels(&window, TraverseOrder::Pre);
        assert_eq!(
            labels,
            vec!["IntervalWindow", "10m", "1m", "5m", "Fill", "ts"]
        );
    }

    #[test]
    fn test_error_short_circuits_siblings() {
        let tree = create_between_and(col("voltage"), int(200), int(240));
        let mut visited = Vec::new();
        let res = walk_expr(Some(&tree), &mut |n| {
            visited.push(label(n));
            if label(n) == "voltage" {
                WalkControl::Error
            } else {
                WalkControl::Continue
            }
        });
        assert_eq!(res, WalkControl::Error);
        // 第一个 voltage 终止整体遍历，右侧分支不再访问
        assert_eq!(visited, vec!["And", "GreaterEqual", "voltage"]);
    }

    #[test]
    fn test_end_short_circuits_outer_frames() {
        let tree = create_between_and(col("voltage"), int(200), int(240));
        let mut count = 0usize;
        let res = walk_expr(Some(&tree), &mut |n| {
            count += 1;
            if label(n) == "200" {
                WalkControl::End
            } else {
                WalkControl::Continue
            }
        });
        assert_eq!(res, WalkControl::End);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_post_order_terminal_skips_self_visit() {
        let tree = create_operator_node(OperatorType::GreaterEqual, Some(col("v")), Some(int(200)));
        let mut visited = Vec::new();
        let res = walk_expr_post_order(Some(&tree), &mut |n| {
            visited.push(label(n));
            if label(n) == "200" {
                WalkControl::Error
            } else {
                WalkControl::Continue
            }
        });
        assert_eq!(res, WalkControl::Error);
        // 子节点终止后父节点自身不再访问
        assert_eq!(visited, vec!["v", "200"]);
    }

    #[test]
    fn test_null_root_zero_invocations() {
        let mut count = 0usize;
        let res = walk_expr(None, &mut |_| {
            count += 1;
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_empty_list_zero_invocations() {
        let list = NodeList::new();
        let mut count = 0usize;
        let res = walk_exprs(&list, &mut |_| {
            count += 1;
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_list_error_at_element_counts_invocations() {
        let list: NodeList = (0..5).map(int).collect();
        let mut count = 0usize;
        let res = walk_exprs(&list, &mut |n| {
            count += 1;
            if label(n) == "2" {
                WalkControl::Error
            } else {
                WalkControl::Continue
            }
        });
        assert_eq!(res, WalkControl::Error);
        // 0 号与 1 号元素各一次，2 号元素第三次终止
        assert_eq!(count, 3);
    }

    #[test]
    fn test_depth_guard_stops_pathological_tree() {
        let mut node = int(0);
        for _ in 0..(MAX_WALK_DEPTH + 100) {
            node = create_raw_expr_node(String::new(), node);
        }
        let mut count = 0usize;
        let res = walk_expr(Some(&node), &mut |_| {
            count += 1;
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Error);
        assert_eq!(count, MAX_WALK_DEPTH);
    }
}
