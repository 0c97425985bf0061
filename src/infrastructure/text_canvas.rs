//! 文本画布 - 基础设施层
//!
//! 画布原始文本缓冲区的唯一持有者，向解析、补全、序列化三个
//! 消费方暴露能力，不让任何一方直接持有可变全局状态。
//! 每次文本变化都同步全量重新解析，解析开销与行数线性相关

use crate::error::{AppError, AppResult, BusinessError};
use crate::models::question::{ParsedQuestion, StoredQuestion};
use crate::services::autocomplete::OptionAutoCompletion;
use crate::services::parser::QuestionParser;
use crate::services::serializer::serialize_questions;

/// 文本画布
pub struct TextCanvas {
    raw_text: String,
    parsed: Vec<ParsedQuestion>,
    parser: QuestionParser,
    assistant: OptionAutoCompletion,
}

impl TextCanvas {
    /// 创建空画布
    pub fn new() -> Self {
        Self::with_parser(QuestionParser::new())
    }

    /// 创建空画布并指定新题目的默认分值
    pub fn with_default_points(default_points: u32) -> Self {
        Self::with_parser(QuestionParser::with_default_points(default_points))
    }

    fn with_parser(parser: QuestionParser) -> Self {
        Self {
            raw_text: String::new(),
            parsed: Vec::new(),
            parser,
            assistant: OptionAutoCompletion::new(),
        }
    }

    /// 整体替换画布文本并重新解析
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        self.reparse();
    }

    /// 处理一次编辑器键入
    ///
    /// 先交给自动补全助手做脚手架插入，再提交文本并重新解析
    ///
    /// # 参数
    /// - `new_text`: 键入后的全文
    /// - `cursor`: 光标位置（UTF-8 字节偏移）
    ///
    /// # 返回
    /// 返回新的光标位置
    pub fn handle_edit(&mut self, new_text: &str, cursor: usize) -> usize {
        let (committed, new_cursor) = self
            .assistant
            .on_text_change(&self.raw_text, new_text, cursor);
        self.raw_text = committed;
        self.reparse();
        new_cursor
    }

    /// 直接修改某道题的分值
    ///
    /// 分值没有文本语法，只能在解析结果上直接改；
    /// 下一次文本变化会重建列表，分值回到默认值
    pub fn set_points(&mut self, index: usize, points: u32) -> AppResult<()> {
        let max_index = self.parsed.len().saturating_sub(1);
        match self.parsed.get_mut(index) {
            Some(question) => {
                question.points = points;
                Ok(())
            }
            None => Err(AppError::Business(BusinessError::IndexOutOfRange {
                index,
                max_index,
            })),
        }
    }

    /// 用存储端题目填充画布（题集加载时执行一次）
    pub fn hydrate(&mut self, stored: &[StoredQuestion]) {
        self.set_text(serialize_questions(stored));
    }

    /// 把导入桥产出的文本追加到画布末尾
    pub fn append_imported(&mut self, imported: &str) {
        let joined = if self.raw_text.is_empty() {
            imported.to_string()
        } else {
            format!("{}\n\n{}", self.raw_text, imported)
        };
        self.set_text(joined);
    }

    /// 当前画布文本
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// 当前解析结果
    pub fn questions(&self) -> &[ParsedQuestion] {
        &self.parsed
    }

    fn reparse(&mut self) {
        self.parsed = self.parser.parse(&self.raw_text);
    }
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new()
    }
}
