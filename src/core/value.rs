//! 标量值类型
//!
//! 字面量节点（`ValueNode`）携带的数据载荷。时间序列场景下时间戳与
//! 时长是一等公民，各自独立成枚举成员而不是复用整数。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 时长单位，对应时长字面量的后缀字符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// 毫秒（后缀 `a`）
    Millisecond,
    /// 秒（后缀 `s`）
    Second,
    /// 分钟（后缀 `m`）
    Minute,
    /// 小时（后缀 `h`）
    Hour,
    /// 天（后缀 `d`）
    Day,
    /// 周（后缀 `w`）
    Week,
}

impl TimeUnit {
    /// 从字面量后缀字符识别单位，未知后缀返回 `None`
    pub fn from_suffix(suffix: char) -> Option<TimeUnit> {
        match suffix {
            'a' => Some(TimeUnit::Millisecond),
            's' => Some(TimeUnit::Second),
            'm' => Some(TimeUnit::Minute),
            'h' => Some(TimeUnit::Hour),
            'd' => Some(TimeUnit::Day),
            'w' => Some(TimeUnit::Week),
            _ => None,
        }
    }

    /// 单位对应的后缀字符
    pub fn suffix(self) -> char {
        match self {
            TimeUnit::Millisecond => 'a',
            TimeUnit::Second => 's',
            TimeUnit::Minute => 'm',
            TimeUnit::Hour => 'h',
            TimeUnit::Day => 'd',
            TimeUnit::Week => 'w',
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// 标量值
///
/// 时间戳与整数同为 `i64`，但语义不同（时间戳承诺为 epoch 毫秒），
/// 折叠等流程不跨 variant 混算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// epoch 毫秒
    Timestamp(i64),
    /// 带单位的时长，如 `10m`
    Duration { value: i64, unit: TimeUnit },
}

impl Value {
    /// 是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Timestamp(ts) => write!(f, "{}", ts),
            Value::Duration { value, unit } => write!(f, "{}{}", value, unit),
        }
    }
}
