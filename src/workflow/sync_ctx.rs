//! 同步上下文
//!
//! 封装"我正在同步哪场考试的题集"这一信息

use std::fmt::Display;

/// 同步上下文
#[derive(Debug, Clone)]
pub struct SyncCtx {
    /// 考试ID（存储端的题目容器）
    pub exam_id: String,

    /// 题集索引（仅用于日志显示）
    pub set_index: usize,
}

impl SyncCtx {
    /// 创建新的同步上下文
    pub fn new(exam_id: String, set_index: usize) -> Self {
        Self { exam_id, set_index }
    }
}

impl Display for SyncCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[考试 ID#{} 题集#{}]", self.exam_id, self.set_index)
    }
}
