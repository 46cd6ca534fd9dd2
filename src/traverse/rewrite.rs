//! 改写遍历
//!
//! 与只读遍历同一张调度表，但回调接收的是**槽位**（[`NodeSlot`]）而不是
//! 节点：对槽位赋值即原位替换节点，清空槽位即删除该子树，父结构无需
//! 任何二次挂接。前序改写在回调之后按槽位的当前占用者下钻，因此替换
//! 进来的新节点的子树同样会被改写；后序改写让回调看到的是已经完成
//! 子树改写的节点。
//!
//! 列表元素的删除在原位留下空槽，其余元素顺序不变，由调用方在改写
//! 结束后用 [`NodeList::compact`] 收缩。

use super::control::{TraverseOrder, WalkControl, MAX_WALK_DEPTH};
use crate::ast::{Node, NodeList, NodeSlot};

/// 按给定次序改写一棵表达式树
///
/// `slot` 为树根所在的槽位；空槽位返回 [`WalkControl::Continue`]
/// 且回调不被调用。
pub fn rewrite_node<R>(slot: &mut NodeSlot, order: TraverseOrder, rewriter: &mut R) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    rewrite_node_at(slot, order, rewriter, 0)
}

/// 按给定次序逐元素改写节点列表
pub fn rewrite_list<R>(list: &mut NodeList, order: TraverseOrder, rewriter: &mut R) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    rewrite_list_at(list, order, rewriter, 0)
}

/// 前序改写表达式树
pub fn rewrite_expr<R>(slot: &mut NodeSlot, rewriter: &mut R) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    rewrite_node(slot, TraverseOrder::Pre, rewriter)
}

/// 前序改写表达式列表
pub fn rewrite_exprs<R>(list: &mut NodeList, rewriter: &mut R) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    rewrite_list(list, TraverseOrder::Pre, rewriter)
}

/// 后序改写表达式树
pub fn rewrite_expr_post_order<R>(slot: &mut NodeSlot, rewriter: &mut R) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    rewrite_node(slot, TraverseOrder::Post, rewriter)
}

/// 后序改写表达式列表
pub fn rewrite_exprs_post_order<R>(list: &mut NodeList, rewriter: &mut R) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    rewrite_list(list, TraverseOrder::Post, rewriter)
}

fn rewrite_node_at<R>(
    slot: &mut NodeSlot,
    order: TraverseOrder,
    rewriter: &mut R,
    depth: usize,
) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    if slot.is_empty() {
        return WalkControl::Continue;
    }
    if depth >= MAX_WALK_DEPTH {
        log::error!("表达式树深度超过上限 {}, 中止改写", MAX_WALK_DEPTH);
        return WalkControl::Error;
    }

    if order == TraverseOrder::Pre {
        let res = rewriter(slot);
        if res.is_terminal() {
            return res;
        }
    }

    // 前序回调可能已替换或清空槽位，按当前占用者下钻
    let res = match slot.get_mut() {
        Some(node) => rewrite_children(node, order, rewriter, depth),
        None => WalkControl::Continue,
    };

    if order == TraverseOrder::Post && !res.is_terminal() {
        return rewriter(slot);
    }
    res
}

fn rewrite_list_at<R>(
    list: &mut NodeList,
    order: TraverseOrder,
    rewriter: &mut R,
    depth: usize,
) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    for slot in list.slots_mut() {
        let res = rewrite_node_at(slot, order, rewriter, depth);
        if res.is_terminal() {
            return res;
        }
    }
    WalkControl::Continue
}

/// 调度表的改写版本，子槽位顺序与只读遍历完全一致
fn rewrite_children<R>(
    node: &mut Node,
    order: TraverseOrder,
    rewriter: &mut R,
    depth: usize,
) -> WalkControl
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
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
            let mut res = rewrite_node_at(&mut op.left, order, rewriter, depth);
            if !res.is_terminal() {
                res = rewrite_node_at(&mut op.right, order, rewriter, depth);
            }
            res
        }
        Node::LogicCondition(cond) => rewrite_list_at(&mut cond.parameters, order, rewriter, depth),
        Node::IsNullCond(cond) => rewrite_node_at(&mut cond.expr, order, rewriter, depth),
        Node::Function(func) => rewrite_list_at(&mut func.parameters, order, rewriter, depth),
        Node::JoinTable(join) => {
            let mut res = rewrite_node_at(&mut join.left, order, rewriter, depth);
            if !res.is_terminal() {
                res = rewrite_node_at(&mut join.right, order, rewriter, depth);
            }
            if !res.is_terminal() {
                res = rewrite_node_at(&mut join.on_cond, order, rewriter, depth);
            }
            res
        }
        Node::GroupingSet(set) => rewrite_list_at(&mut set.parameters, order, rewriter, depth),
        Node::OrderByExpr(order_by) => rewrite_node_at(&mut order_by.expr, order, rewriter, depth),
        Node::StateWindow(state) => {
            let mut res = rewrite_node_at(&mut state.expr, order, rewriter, depth);
            if !res.is_terminal() {
                res = rewrite_node_at(&mut state.col, order, rewriter, depth);
            }
            res
        }
        Node::SessionWindow(session) => {
            let mut res = rewrite_node_at(&mut session.col, order, rewriter, depth);
            if !res.is_terminal() {
                res = rewrite_node_at(&mut session.gap, order, rewriter, depth);
            }
            res
        }
        Node::IntervalWindow(window) => {
            let mut res = rewrite_node_at(&mut window.interval, order, rewriter, depth);
            if !res.is_terminal() {
                res = rewrite_node_at(&mut window.offset, order, rewriter, depth);
            }
            if !res.is_terminal() {
                res = rewrite_node_at(&mut window.sliding, order, rewriter, depth);
            }
            if !res.is_terminal() {
                res = rewrite_node_at(&mut window.fill, order, rewriter, depth);
            }
            if !res.is_terminal() {
                res = rewrite_node_at(&mut window.col, order, rewriter, depth);
            }
            res
        }
        Node::List(list) => rewrite_list_at(&mut list.node_list, order, rewriter, depth),
        Node::Fill(fill) => rewrite_node_at(&mut fill.values, order, rewriter, depth),
        Node::RawExpr(raw) => rewrite_node_at(&mut raw.expr, order, rewriter, depth),
        Node::Target(target) => rewrite_node_at(&mut target.expr, order, rewriter, depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        create_between_and, create_column_node, create_fill_node, create_is_null_cond_node,
        create_operator_node, create_raw_expr_node, create_value_node, FillMode, FunctionNode,
        IntervalWindowNode, NodeKind, OperatorType,
    };
    use crate::core::{TimeUnit, Value};

    fn col(name: &str) -> Node {
        create_column_node(None, name.to_string()).expect("合法列名")
    }

    fn int(v: i64) -> Node {
        create_value_node(Value::Int(v))
    }

    fn is_column_named(node: Option<&Node>, name: &str) -> bool {
        matches!(node, Some(Node::Column(col)) if col.col_name == name)
    }

    #[test]
    fn test_identity_rewrite_preserves_tree() {
        let mut slot = NodeSlot::new(create_between_and(col("voltage"), int(200), int(240)));
        let expected = slot.clone();
        let res = rewrite_expr(&mut slot, &mut |_| WalkControl::Continue);
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(slot, expected);

        let mut slot_post = expected.clone();
        let res = rewrite_expr_post_order(&mut slot_post, &mut |_| WalkControl::Continue);
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(slot_post, expected);
    }

    #[test]
    fn test_pre_replacement_updates_slot_in_place() {
        let tree = create_operator_node(OperatorType::Add, Some(col("x")), Some(col("y")));
        let mut slot = NodeSlot::new(tree);
        let res = rewrite_expr(&mut slot, &mut |s| {
            if is_column_named(s.get(), "x") {
                s.set(int(0));
            }
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);

        let expected = NodeSlot::new(create_operator_node(
            OperatorType::Add,
            Some(int(0)),
            Some(col("y")),
        ));
        assert_eq!(slot, expected);

        // 后续只读遍历不再遇到被替换的列
        let mut saw_x = false;
        crate::traverse::walk_expr(slot.get(), &mut |n| {
            if is_column_named(Some(n), "x") {
                saw_x = true;
            }
            WalkControl::Continue
        });
        assert!(!saw_x);
    }

    #[test]
    fn test_pre_replacement_descends_into_new_subtree() {
        let mut slot = NodeSlot::new(col("x"));
        let mut visited = 0usize;
        let res = rewrite_expr(&mut slot, &mut |s| {
            visited += 1;
            if is_column_named(s.get(), "x") {
                s.set(create_operator_node(
                    OperatorType::Add,
                    Some(int(1)),
                    Some(int(2)),
                ));
            }
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);
        // 根槽位一次，替换进来的新节点的两个子槽位各一次
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_post_deletion_from_list() {
        let params: NodeList = ["a", "b", "c"].iter().map(|n| col(n)).collect();
        let func = Node::Function(FunctionNode::new("concat".to_string(), params));
        let mut slot = NodeSlot::new(func);

        let res = rewrite_expr_post_order(&mut slot, &mut |s| {
            if is_column_named(s.get(), "b") {
                s.clear();
            }
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);

        match slot.get() {
            Some(Node::Function(func)) => {
                // 删除留下空槽占位，剩余元素顺序不变
                assert_eq!(func.parameters.len(), 2);
                assert_eq!(func.parameters.slot_count(), 3);
                let names: Vec<&Node> = func.parameters.iter().collect();
                assert!(is_column_named(Some(names[0]), "a"));
                assert!(is_column_named(Some(names[1]), "c"));
            }
            other => panic!("期望函数节点, 实际 {:?}", other.map(Node::kind)),
        }
    }

    #[test]
    fn test_named_slot_deletion_leaves_siblings() {
        let window = Node::IntervalWindow(IntervalWindowNode::new(
            NodeSlot::new(create_value_node(Value::Duration {
                value: 10,
                unit: TimeUnit::Minute,
            })),
            NodeSlot::empty(),
            NodeSlot::empty(),
            NodeSlot::new(create_fill_node(FillMode::Prev, None)),
            NodeSlot::new(col("ts")),
        ));
        let mut slot = NodeSlot::new(window);

        let res = rewrite_expr_post_order(&mut slot, &mut |s| {
            if matches!(s.get().map(Node::kind), Some(NodeKind::Fill)) {
                s.clear();
            }
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);

        match slot.get() {
            Some(Node::IntervalWindow(window)) => {
                assert!(window.fill.is_empty());
                assert!(!window.interval.is_empty());
                assert!(!window.col.is_empty());
            }
            other => panic!("期望间隔窗口节点, 实际 {:?}", other.map(Node::kind)),
        }
    }

    #[test]
    fn test_pre_clear_skips_subtree() {
        let tree = create_is_null_cond_node(
            create_operator_node(OperatorType::Add, Some(int(1)), Some(int(2))),
            true,
        );
        let mut slot = NodeSlot::new(tree);
        let mut calls = 0usize;
        let res = rewrite_expr(&mut slot, &mut |s| {
            calls += 1;
            if matches!(s.get().map(Node::kind), Some(NodeKind::IsNullCond)) {
                s.clear();
            }
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);
        assert!(slot.is_empty());
        // 清空后的槽位没有占用者，子树不再下钻
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_rewriter_error_propagates() {
        let tree = create_operator_node(OperatorType::Add, Some(int(1)), Some(int(2)));
        let mut slot = NodeSlot::new(tree);
        let mut calls = 0usize;
        let res = rewrite_expr(&mut slot, &mut |s| {
            calls += 1;
            if matches!(s.get(), Some(Node::Value(val)) if val.value == Value::Int(2)) {
                WalkControl::Error
            } else {
                WalkControl::Continue
            }
        });
        assert_eq!(res, WalkControl::Error);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_list_rewrite_preserves_untouched_elements() {
        let mut list: NodeList = (0..4).map(int).collect();
        let res = rewrite_exprs(&mut list, &mut |s| {
            if matches!(s.get(), Some(Node::Value(val)) if val.value == Value::Int(2)) {
                s.set(int(20));
            }
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);
        let expected: NodeList = [0, 1, 20, 3].into_iter().map(int).collect();
        assert_eq!(list, expected);
    }

    #[test]
    fn test_rewrite_depth_guard() {
        let mut node = int(0);
        for _ in 0..(MAX_WALK_DEPTH + 100) {
            node = create_raw_expr_node(String::new(), node);
        }
        let mut slot = NodeSlot::new(node);
        let res = rewrite_expr(&mut slot, &mut |_| WalkControl::Continue);
        assert_eq!(res, WalkControl::Error);
    }

    #[test]
    fn test_empty_slot_zero_invocations() {
        let mut slot = NodeSlot::empty();
        let mut calls = 0usize;
        let res = rewrite_expr(&mut slot, &mut |_| {
            calls += 1;
            WalkControl::Continue
        });
        assert_eq!(res, WalkControl::Continue);
        assert_eq!(calls, 0);
    }
}
