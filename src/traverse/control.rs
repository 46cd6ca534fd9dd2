//! 遍历控制类型

/// 遍历次序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverseOrder {
    /// 先访问节点自身，再下钻子节点
    Pre,
    /// 先下钻子节点，再访问节点自身
    Post,
}

/// 回调对遍历进程的控制指令
///
/// `Error` 与 `End` 在每一层递归中同样短路，引擎不区分两者的结构含义，
/// 只把值原样交还顶层调用方解释。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// 正常继续
    Continue,
    /// 整体中止：回调发现错误
    Error,
    /// 整体中止：提前命中目标，视为成功结束
    End,
}

impl WalkControl {
    /// 是否为终止指令
    pub fn is_terminal(self) -> bool {
        !matches!(self, WalkControl::Continue)
    }
}

/// 递归深度上限
///
/// 超过上限的遍历记录错误日志并以 [`WalkControl::Error`] 终止，
/// 防止病态深树耗尽调用栈。
pub const MAX_WALK_DEPTH: usize = 1024;
