//! FindNodeVisitor - 按谓词查找首个匹配节点
//!
//! 前序遍历，命中即以 End 终止，访问计数可观察到早停。

use crate::ast::Node;
use crate::traverse::{walk_expr, WalkControl};

/// 节点匹配谓词
pub type NodeMatcher = fn(&Node) -> bool;

/// 节点查找访问器
#[derive(Debug)]
pub struct FindNodeVisitor {
    matcher: NodeMatcher,
    found: Option<Node>,
    visited: usize,
}

impl FindNodeVisitor {
    pub fn new(matcher: NodeMatcher) -> Self {
        Self {
            matcher,
            found: None,
            visited: 0,
        }
    }

    /// 前序查找首个匹配节点
    ///
    /// 重复调用会重置上一次的结果与计数。
    pub fn find(&mut self, node: Option<&Node>) -> Option<&Node> {
        self.found = None;
        self.visited = 0;
        let matcher = self.matcher;
        let _ = walk_expr(node, &mut |n| {
            self.visited += 1;
            if matcher(n) {
                self.found = Some(n.clone());
                WalkControl::End
            } else {
                WalkControl::Continue
            }
        });
        self.found.as_ref()
    }

    /// 是否存在匹配节点
    pub fn exists(&mut self, node: Option<&Node>) -> bool {
        self.find(node).is_some()
    }

    /// 最近一次查找访问的节点数
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// 取出命中的节点
    pub fn into_found(self) -> Option<Node> {
        self.found
    }
}
