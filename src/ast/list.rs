//! 节点槽位与节点列表
//!
//! `NodeSlot` 是"节点被存放的位置"本身：父节点的具名子字段或列表中的
//! 一格。改写遍历把槽位而不是节点交给回调，因此替换、删除子树都是对
//! 槽位的一次赋值，父结构无需任何二次挂接。
//!
//! `NodeList` 保持插入顺序；改写中被删除的元素留下空槽占位，其余元素
//! 的相对顺序不受影响，调用方在改写结束后用 [`NodeList::compact`] 收缩。

use super::node::Node;
use serde::{Deserialize, Serialize};

/// 节点槽位，可原位替换或清空
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeSlot(Option<Box<Node>>);

impl NodeSlot {
    /// 创建空槽位
    pub fn empty() -> NodeSlot {
        NodeSlot(None)
    }

    /// 创建持有给定节点的槽位
    pub fn new(node: Node) -> NodeSlot {
        NodeSlot(Some(Box::new(node)))
    }

    /// 槽位中的节点
    pub fn get(&self) -> Option<&Node> {
        self.0.as_deref()
    }

    /// 槽位中的节点（可变）
    pub fn get_mut(&mut self) -> Option<&mut Node> {
        self.0.as_deref_mut()
    }

    /// 放入节点，原节点（若有）被丢弃
    pub fn set(&mut self, node: Node) {
        self.0 = Some(Box::new(node));
    }

    /// 放入节点并取回原节点
    pub fn replace(&mut self, node: Node) -> Option<Node> {
        self.0.replace(Box::new(node)).map(|boxed| *boxed)
    }

    /// 取出节点，槽位变空
    pub fn take(&mut self) -> Option<Node> {
        self.0.take().map(|boxed| *boxed)
    }

    /// 清空槽位，等价于删除该子树
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// 槽位是否为空
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Node> for NodeSlot {
    fn from(node: Node) -> Self {
        NodeSlot::new(node)
    }
}

impl From<Option<Node>> for NodeSlot {
    fn from(node: Option<Node>) -> Self {
        NodeSlot(node.map(Box::new))
    }
}

/// 有序节点列表
///
/// 语义上顺序即参数序、操作数序，任何改写都必须保持。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList {
    slots: Vec<NodeSlot>,
}

impl NodeList {
    /// 创建空列表
    pub fn new() -> NodeList {
        NodeList { slots: Vec::new() }
    }

    /// 追加一个节点
    pub fn push(&mut self, node: Node) {
        self.slots.push(NodeSlot::new(node));
    }

    /// 占用槽位的数量（不含删除后留下的空槽）
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// 槽位总数，含空槽
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// 是否没有任何占用槽位
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按序遍历占用槽位中的节点
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().filter_map(|slot| slot.get())
    }

    /// 全部槽位（含空槽），遍历引擎按此下钻
    pub fn slots(&self) -> &[NodeSlot] {
        &self.slots
    }

    /// 全部槽位（可变），改写遍历按此下钻
    pub fn slots_mut(&mut self) -> &mut [NodeSlot] {
        &mut self.slots
    }

    /// 收缩列表，移除空槽
    pub fn compact(&mut self) {
        self.slots.retain(|slot| !slot.is_empty());
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        NodeList {
            slots: iter.into_iter().map(NodeSlot::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::node::ValueNode;
    use crate::core::Value;

    fn int_node(v: i64) -> Node {
        Node::Value(ValueNode::new(Value::Int(v)))
    }

    #[test]
    fn test_slot_replace_and_take() {
        let mut slot = NodeSlot::new(int_node(1));
        let old = slot.replace(int_node(2));
        assert_eq!(old, Some(int_node(1)));
        assert_eq!(slot.take(), Some(int_node(2)));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_slot_clear() {
        let mut slot = NodeSlot::new(int_node(1));
        slot.clear();
        assert!(slot.is_empty());
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_list_preserves_order() {
        let list: NodeList = (0..4).map(int_node).collect();
        let collected: Vec<&Node> = list.iter().collect();
        assert_eq!(collected.len(), 4);
        assert_eq!(collected[0], &int_node(0));
        assert_eq!(collected[3], &int_node(3));
    }

    #[test]
    fn test_list_len_vs_slot_count_after_clear() {
        let mut list: NodeList = (0..3).map(int_node).collect();
        list.slots_mut()[1].clear();
        assert_eq!(list.len(), 2);
        assert_eq!(list.slot_count(), 3);
        // 剩余元素顺序不变
        let remaining: Vec<&Node> = list.iter().collect();
        assert_eq!(remaining, vec![&int_node(0), &int_node(2)]);

        list.compact();
        assert_eq!(list.slot_count(), 2);
    }

    #[test]
    fn test_empty_list() {
        let list = NodeList::new();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }
}
