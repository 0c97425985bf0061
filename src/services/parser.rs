/// 画布文本解析器
///
/// 把画布原始文本解析为有序题目列表。对任意输入都不会失败：
/// 不符合语法的行直接忽略，这是刻意的宽容策略，不是疏漏
use crate::models::question::ParsedQuestion;
use regex::Regex;

/// 未指定时的题目默认分值
pub const DEFAULT_POINTS: u32 = 10;

/// 画布文本解析器
pub struct QuestionParser {
    header_re: Regex,
    option_re: Regex,
    default_points: u32,
}

impl QuestionParser {
    /// 创建解析器，使用默认分值
    pub fn new() -> Self {
        Self::with_default_points(DEFAULT_POINTS)
    }

    /// 创建解析器并指定新题目的默认分值
    pub fn with_default_points(default_points: u32) -> Self {
        Self {
            // 题头行: "Câu <题号>: <题干>"，大小写不敏感，题号取到第一个冒号为止
            header_re: Regex::new(r"(?i)^câu\s+([^:]*):?\s*(.*)$").unwrap(),
            // 选项行: 可选 '*' 前缀 + 单个大写字母 + '.'
            option_re: Regex::new(r"^\*?[A-Z]\.").unwrap(),
            default_points,
        }
    }

    /// 解析画布文本
    ///
    /// # 参数
    /// - `raw`: 画布原始文本
    ///
    /// # 返回
    /// 按出现顺序排列的题目列表
    pub fn parse(&self, raw: &str) -> Vec<ParsedQuestion> {
        let mut questions = Vec::new();
        let mut current: Option<ParsedQuestion> = None;

        for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(caps) = self.header_re.captures(line) {
                // 新题头：先落盘上一道题
                if let Some(done) = current.take() {
                    questions.push(done);
                }

                let display_number = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();

                current = Some(ParsedQuestion::new(display_number, text, self.default_points));
            } else if let Some(question) = current.as_mut() {
                if self.option_re.is_match(line) {
                    let is_correct = line.starts_with('*');
                    // 选项内容取第一个 '.' 之后的部分（正则已保证 '.' 存在）
                    let dot = line.find('.').unwrap_or(0);
                    let option_text = line[dot + 1..].trim().to_string();

                    if is_correct {
                        // 多个 '*' 标记时，最后一个生效
                        question.correct_answer = option_text.clone();
                    }
                    question.options.push(option_text);
                }
            }
            // 其余行（题头之前的选项行、空白分隔、随手注释）一律忽略
        }

        if let Some(done) = current.take() {
            questions.push(done);
        }

        questions
    }
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new()
    }
}
