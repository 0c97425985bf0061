use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::sync_plan::QuestionPayload;

/// 题目类型
///
/// 目前只有选择题会被结构化解析，其他声明类型以纯文本块形式原样通过
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// 选择题
    #[default]
    MultipleChoice,
}

static CLIENT_ID_SEQ: AtomicU64 = AtomicU64::new(1);

/// 生成进程内唯一的临时客户端ID
fn next_client_id() -> String {
    format!("temp_{}", CLIENT_ID_SEQ.fetch_add(1, Ordering::Relaxed))
}

/// 从画布文本解析出的题目
///
/// 短暂存在：每次文本变化都会整体重建，不做增量修改。
/// 与存储端题目没有ID关联，同步时完全依靠题干内容匹配。
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestion {
    /// 临时客户端ID，仅用于列表渲染，不会发送到存储端
    pub client_id: String,
    /// 作者书写的题号（仅展示用，同步时按位置重新生成）
    pub display_number: String,
    /// 题干
    pub text: String,
    /// 题目类型
    pub question_type: QuestionType,
    /// 选项内容，按声明顺序，允许重复
    pub options: Vec<String>,
    /// 正确答案（选项内容，不是字母）
    pub correct_answer: String,
    /// 分值
    pub points: u32,
}

impl ParsedQuestion {
    /// 创建一道新解析出的题目
    ///
    /// # 参数
    /// - `display_number`: 作者书写的题号
    /// - `text`: 题干
    /// - `points`: 默认分值
    pub fn new(display_number: String, text: String, points: u32) -> Self {
        Self {
            client_id: next_client_id(),
            display_number,
            text,
            question_type: QuestionType::MultipleChoice,
            options: Vec::new(),
            correct_answer: String::new(),
            points,
        }
    }

    /// 转换为同步操作载荷
    ///
    /// `display_number` 使用按位置重新生成的规范题号，而不是作者书写的题号
    pub fn to_payload(&self, display_number: String) -> QuestionPayload {
        QuestionPayload {
            display_number,
            text: self.text.clone(),
            question_type: self.question_type,
            options: self.options.clone(),
            correct_answer: self.correct_answer.clone(),
            points: self.points,
        }
    }
}

/// 存储端持有的题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuestion {
    /// 存储端分配的ID
    pub id: String,
    #[serde(default)]
    pub display_number: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
    pub points: u32,
    /// 创建时间，由存储端写入
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// 最近更新时间，由存储端写入
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
