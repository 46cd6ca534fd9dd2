//! 子句级联遍历
//!
//! 以某个子句为截止，按固定顺序（FROM → WHERE → PARTITION BY → WINDOW →
//! GROUP BY → HAVING → DISTINCT → ORDER BY → PROJECTION）访问 SELECT
//! 语句中排在截止子句之前（含截止子句）的全部子句。"访问 1..X 全部子句"
//! 是具名的累积语义，不是只访问 X 自身。
//!
//! 各子句分别以前序独立遍历，单个子句内的终止结果不影响后续子句；
//! 调用方通过回调捕获的状态观察遍历产出。`slimit` / `limit` 不参与级联。

use super::control::{TraverseOrder, WalkControl};
use super::rewrite::{rewrite_list, rewrite_node};
use super::walk::{walk_list, walk_node};
use crate::ast::{Node, NodeSlot, SelectStmt, SqlClause};

/// 以 `clause` 为截止，级联只读遍历语句各子句
///
/// `None` 语句是空操作。
pub fn walk_select_stmt<F>(stmt: Option<&SelectStmt>, clause: SqlClause, visitor: &mut F)
where
    F: FnMut(&Node) -> WalkControl,
{
    let stmt = match stmt {
        Some(stmt) => stmt,
        None => return,
    };
    for current in SqlClause::ALL {
        if current > clause {
            break;
        }
        walk_clause(stmt, current, visitor);
    }
}

/// 以 `clause` 为截止，级联改写语句各子句
pub fn rewrite_select_stmt<R>(stmt: Option<&mut SelectStmt>, clause: SqlClause, rewriter: &mut R)
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    let stmt = match stmt {
        Some(stmt) => stmt,
        None => return,
    };
    for current in SqlClause::ALL {
        if current > clause {
            break;
        }
        rewrite_clause(stmt, current, rewriter);
    }
}

fn walk_clause<F>(stmt: &SelectStmt, clause: SqlClause, visitor: &mut F)
where
    F: FnMut(&Node) -> WalkControl,
{
    match clause {
        SqlClause::From => {
            let _ = walk_node(stmt.from.get(), TraverseOrder::Pre, visitor);
        }
        SqlClause::Where => {
            let _ = walk_node(stmt.where_clause.get(), TraverseOrder::Pre, visitor);
        }
        SqlClause::PartitionBy => {
            let _ = walk_list(&stmt.partition_by, TraverseOrder::Pre, visitor);
        }
        SqlClause::Window => {
            let _ = walk_node(stmt.window.get(), TraverseOrder::Pre, visitor);
        }
        SqlClause::GroupBy => {
            let _ = walk_list(&stmt.group_by, TraverseOrder::Pre, visitor);
        }
        SqlClause::Having => {
            let _ = walk_node(stmt.having.get(), TraverseOrder::Pre, visitor);
        }
        // 语句标志，无对应节点
        SqlClause::Distinct => {}
        SqlClause::OrderBy => {
            let _ = walk_list(&stmt.order_by, TraverseOrder::Pre, visitor);
        }
        SqlClause::Projection => {
            let _ = walk_list(&stmt.projections, TraverseOrder::Pre, visitor);
        }
    }
}

fn rewrite_clause<R>(stmt: &mut SelectStmt, clause: SqlClause, rewriter: &mut R)
where
    R: FnMut(&mut NodeSlot) -> WalkControl,
{
    match clause {
        SqlClause::From => {
            let _ = rewrite_node(&mut stmt.from, TraverseOrder::Pre, rewriter);
        }
        SqlClause::Where => {
            let _ = rewrite_node(&mut stmt.where_clause, TraverseOrder::Pre, rewriter);
        }
        SqlClause::PartitionBy => {
            let _ = rewrite_list(&mut stmt.partition_by, TraverseOrder::Pre, rewriter);
        }
        SqlClause::Window => {
            let _ = rewrite_node(&mut stmt.window, TraverseOrder::Pre, rewriter);
        }
        SqlClause::GroupBy => {
            let _ = rewrite_list(&mut stmt.group_by, TraverseOrder::Pre, rewriter);
        }
        SqlClause::Having => {
            let _ = rewrite_node(&mut stmt.having, TraverseOrder::Pre, rewriter);
        }
        // 语句标志，无对应节点
        SqlClause::Distinct => {}
        SqlClause::OrderBy => {
            let _ = rewrite_list(&mut stmt.order_by, TraverseOrder::Pre, rewriter);
        }
        SqlClause::Projection => {
            let _ = rewrite_list(&mut stmt.projections, TraverseOrder::Pre, rewriter);
        }
    }
}
