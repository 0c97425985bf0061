/// 选项行自动补全
///
/// 监听编辑器文本变化：作者敲出 "A." / "*B." 这类选项开头时，
/// 自动在光标后插入后续字母的脚手架行。纯文本变换，
/// 不落盘、不影响解析语义（手敲和补全出来的选项行解析结果一致）
use regex::Regex;

/// 脚手架补到的最后一个字母
const LAST_SCAFFOLD_LETTER: u8 = b'D';

/// 选项行自动补全助手
pub struct OptionAutoCompletion {
    trigger_re: Regex,
}

impl OptionAutoCompletion {
    pub fn new() -> Self {
        Self {
            // 光标前的当前行形如 "A." 或 "*A."（A–D 范围内才触发）
            trigger_re: Regex::new(r"^\*?([A-D])\.$").unwrap(),
        }
    }

    /// 文本变更回调
    ///
    /// # 参数
    /// - `_previous_text`: 变更前文本（当前判定不需要，保留在签名中与调用方约定一致）
    /// - `new_text`: 变更后文本
    /// - `cursor`: 光标位置（UTF-8 字节偏移）
    ///
    /// # 返回
    /// 返回 (提交文本, 新光标位置)；不满足触发条件时原样返回
    pub fn on_text_change(
        &self,
        _previous_text: &str,
        new_text: &str,
        cursor: usize,
    ) -> (String, usize) {
        // 光标必须落在字符边界内，否则不做任何处理
        if cursor == 0 || cursor > new_text.len() || !new_text.is_char_boundary(cursor) {
            return (new_text.to_string(), cursor);
        }

        // 刚输入的字符必须是 '.'
        if new_text.as_bytes()[cursor - 1] != b'.' {
            return (new_text.to_string(), cursor);
        }

        let before_cursor = &new_text[..cursor];
        let current_line = before_cursor.rsplit('\n').next().unwrap_or("");

        let letter = match self.trigger_re.captures(current_line) {
            Some(caps) => caps[1].as_bytes()[0],
            None => return (new_text.to_string(), cursor),
        };

        // 逐个后继字母向下看一行：该行已是对应选项开头则视为
        // 脚手架已存在，停止；否则补一行
        let current_line_number = before_cursor.matches('\n').count();
        let lines: Vec<&str> = new_text.split('\n').collect();

        let mut segments: Vec<String> = Vec::new();
        for (offset, next_letter) in ((letter + 1)..=LAST_SCAFFOLD_LETTER).enumerate() {
            let expected_prefix = format!("{}.", next_letter as char);
            match lines.get(current_line_number + offset + 1) {
                Some(line) if line.trim().starts_with(&expected_prefix) => break,
                _ => segments.push(format!("\n{} ", expected_prefix)),
            }
        }

        if segments.is_empty() {
            return (new_text.to_string(), cursor);
        }

        let scaffold: String = segments.concat();
        let mut committed = String::with_capacity(new_text.len() + scaffold.len());
        committed.push_str(before_cursor);
        committed.push_str(&scaffold);
        committed.push_str(&new_text[cursor..]);

        // 光标停在第一段脚手架之后，作者可以直接续写下一个选项
        let new_cursor = cursor + segments[0].len();

        (committed, new_cursor)
    }
}

impl Default for OptionAutoCompletion {
    fn default() -> Self {
        Self::new()
    }
}
