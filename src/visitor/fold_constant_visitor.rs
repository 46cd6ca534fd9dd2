//! FoldConstantVisitor - 常量表达式折叠
//!
//! 后序改写：子表达式先折叠，父表达式随即看到已折叠的子节点，
//! 嵌套常量逐层收缩为单个字面量。只折叠操作数全部为字面量的
//! 子树，除零与溢出通过 `FoldError` 上报并中止改写。

use crate::ast::{LogicConditionNode, LogicConditionType, Node, NodeSlot, OperatorNode, OperatorType, ValueNode};
use crate::core::Value;
use crate::traverse::{rewrite_expr_post_order, WalkControl};
use std::cmp::Ordering;
use thiserror::Error;

/// 折叠过程中的计算错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FoldError {
    #[error("除数为零")]
    DivisionByZero,
    #[error("数值溢出: {0}")]
    Overflow(String),
}

/// 常量折叠访问器
#[derive(Debug, Default)]
pub struct FoldConstantVisitor {
    folded: usize,
    error: Option<FoldError>,
}

impl FoldConstantVisitor {
    pub fn new() -> Self {
        Self {
            folded: 0,
            error: None,
        }
    }

    /// 后序折叠一棵表达式树，返回本次折叠的子树数量
    ///
    /// 计算错误时改写在出错子树处中止，已折叠的兄弟子树保持折叠后的形态。
    pub fn fold(&mut self, slot: &mut NodeSlot) -> Result<usize, FoldError> {
        self.folded = 0;
        self.error = None;
        let res = rewrite_expr_post_order(slot, &mut |s| self.fold_slot(s));
        match (res, self.error.take()) {
            (WalkControl::Error, Some(err)) => Err(err),
            _ => Ok(self.folded),
        }
    }

    /// 最近一次调用折叠的子树数量
    pub fn folded(&self) -> usize {
        self.folded
    }

    fn fold_slot(&mut self, slot: &mut NodeSlot) -> WalkControl {
        let folded = match slot.get() {
            Some(Node::Operator(op)) => match fold_operator(op) {
                Ok(value) => value,
                Err(err) => {
                    self.error = Some(err);
                    return WalkControl::Error;
                }
            },
            Some(Node::LogicCondition(cond)) => fold_logic(cond),
            _ => None,
        };
        if let Some(value) = folded {
            slot.set(Node::Value(ValueNode::new(value)));
            self.folded += 1;
        }
        WalkControl::Continue
    }
}

fn fold_operator(op: &OperatorNode) -> Result<Option<Value>, FoldError> {
    if op.op_type.is_unary() {
        let operand = match constant_of(&op.left) {
            Some(v) => v,
            None => return Ok(None),
        };
        return fold_unary(op.op_type, operand);
    }
    let left = match constant_of(&op.left) {
        Some(v) => v,
        None => return Ok(None),
    };
    let right = match constant_of(&op.right) {
        Some(v) => v,
        None => return Ok(None),
    };
    fold_binary(op.op_type, left, right)
}

fn constant_of(slot: &NodeSlot) -> Option<&Value> {
    match slot.get() {
        Some(Node::Value(val)) => Some(&val.value),
        _ => None,
    }
}

fn fold_unary(op: OperatorType, operand: &Value) -> Result<Option<Value>, FoldError> {
    match (op, operand) {
        (OperatorType::Minus, Value::Int(v)) => {
            let negated = v
                .checked_neg()
                .ok_or_else(|| FoldError::Overflow(format!("-({})", v)))?;
            Ok(Some(Value::Int(negated)))
        }
        (OperatorType::Minus, Value::Float(v)) => Ok(Some(Value::Float(-v))),
        _ => Ok(None),
    }
}

fn fold_binary(op: OperatorType, left: &Value, right: &Value) -> Result<Option<Value>, FoldError> {
    use OperatorType::*;
    match op {
        Add | Subtract | Multiply | Divide | Remainder => fold_arithmetic(op, left, right),
        GreaterThan | GreaterEqual | LowerThan | LowerEqual | Equal | NotEqual => {
            Ok(fold_comparison(op, left, right))
        }
        // LIKE/IN 依赖执行期语义，不折叠
        _ => Ok(None),
    }
}

/// 整数对整数保持整数语义，混合与浮点按浮点计算
fn fold_arithmetic(op: OperatorType, left: &Value, right: &Value) -> Result<Option<Value>, FoldError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(op, *a, *b),
        (Value::Float(a), Value::Float(b)) => float_arithmetic(op, *a, *b),
        (Value::Int(a), Value::Float(b)) => float_arithmetic(op, *a as f64, *b),
        (Value::Float(a), Value::Int(b)) => float_arithmetic(op, *a, *b as f64),
        _ => Ok(None),
    }
}

fn int_arithmetic(op: OperatorType, a: i64, b: i64) -> Result<Option<Value>, FoldError> {
    let result = match op {
        OperatorType::Add => a.checked_add(b),
        OperatorType::Subtract => a.checked_sub(b),
        OperatorType::Multiply => a.checked_mul(b),
        OperatorType::Divide => {
            if b == 0 {
                return Err(FoldError::DivisionByZero);
            }
            a.checked_div(b)
        }
        OperatorType::Remainder => {
            if b == 0 {
                return Err(FoldError::DivisionByZero);
            }
            a.checked_rem(b)
        }
        _ => return Ok(None),
    };
    match result {
        Some(v) => Ok(Some(Value::Int(v))),
        None => Err(FoldError::Overflow(format!("{} {:?} {}", a, op, b))),
    }
}

fn float_arithmetic(op: OperatorType, a: f64, b: f64) -> Result<Option<Value>, FoldError> {
    let result = match op {
        OperatorType::Add => a + b,
        OperatorType::Subtract => a - b,
        OperatorType::Multiply => a * b,
        OperatorType::Divide => {
            if b == 0.0 {
                return Err(FoldError::DivisionByZero);
            }
            a / b
        }
        OperatorType::Remainder => {
            if b == 0.0 {
                return Err(FoldError::DivisionByZero);
            }
            a % b
        }
        _ => return Ok(None),
    };
    Ok(Some(Value::Float(result)))
}

fn fold_comparison(op: OperatorType, left: &Value, right: &Value) -> Option<Value> {
    let ordering = compare_values(left, right)?;
    let result = match op {
        OperatorType::GreaterThan => ordering == Ordering::Greater,
        OperatorType::GreaterEqual => ordering != Ordering::Less,
        OperatorType::LowerThan => ordering == Ordering::Less,
        OperatorType::LowerEqual => ordering != Ordering::Greater,
        OperatorType::Equal => ordering == Ordering::Equal,
        OperatorType::NotEqual => ordering != Ordering::Equal,
        _ => return None,
    };
    Some(Value::Bool(result))
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn fold_logic(cond: &LogicConditionNode) -> Option<Value> {
    // 含空槽的参数列表不折叠
    if cond.parameters.len() != cond.parameters.slot_count() {
        return None;
    }
    let mut bools = Vec::with_capacity(cond.parameters.len());
    for node in cond.parameters.iter() {
        match node {
            Node::Value(val) => match val.value {
                Value::Bool(b) => bools.push(b),
                _ => return None,
            },
            _ => return None,
        }
    }
    let result = match cond.cond_type {
        LogicConditionType::And => {
            if bools.is_empty() {
                return None;
            }
            bools.iter().all(|b| *b)
        }
        LogicConditionType::Or => {
            if bools.is_empty() {
                return None;
            }
            bools.iter().any(|b| *b)
        }
        LogicConditionType::Not => {
            if bools.len() != 1 {
                return None;
            }
            !bools[0]
        }
    };
    Some(Value::Bool(result))
}
