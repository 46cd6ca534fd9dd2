//! CollectColumnsVisitor - 收集表达式引用的列
//!
//! 按首次出现顺序收集列的限定名并去重，供列绑定、谓词下推等流程
//! 确定表达式依赖的列集合。

use crate::ast::{Node, NodeList};
use crate::traverse::{walk_expr, walk_exprs, WalkControl};
use std::collections::HashSet;

/// 列收集访问器
#[derive(Debug, Default)]
pub struct CollectColumnsVisitor {
    /// 首次出现顺序的限定列名
    columns: Vec<String>,
    seen: HashSet<String>,
}

impl CollectColumnsVisitor {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// 收集一棵表达式树引用的列，返回累计结果
    ///
    /// 多次调用在同一实例上累积，重复列名只记录首次出现。
    pub fn collect(&mut self, node: Option<&Node>) -> &[String] {
        let _ = walk_expr(node, &mut |n| {
            self.note(n);
            WalkControl::Continue
        });
        &self.columns
    }

    /// 收集一个表达式列表引用的列
    pub fn collect_from_list(&mut self, list: &NodeList) -> &[String] {
        let _ = walk_exprs(list, &mut |n| {
            self.note(n);
            WalkControl::Continue
        });
        &self.columns
    }

    /// 已收集的列
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 取出收集结果
    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }

    fn note(&mut self, node: &Node) {
        if let Node::Column(col) = node {
            let name = col.qualified_name();
            if self.seen.insert(name.clone()) {
                self.columns.push(name);
            }
        }
    }
}
