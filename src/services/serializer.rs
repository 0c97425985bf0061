/// 题目序列化
///
/// 解析器的逆向：把存储端题目还原为画布规范文本。
/// 题集加载时执行一次，用序列化结果填充编辑器
use crate::models::question::{QuestionType, StoredQuestion};

/// 把存储端题目列表序列化为画布文本
///
/// 每道题一个文本块：题头行 + 逐行选项，正确答案加 '*' 前缀，
/// 选项字母按位置重新分配（A、B、C…），题块之间空一行
pub fn serialize_questions(questions: &[StoredQuestion]) -> String {
    let mut blocks = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let mut block = String::new();

        // 题号缺失时回退到位置序号
        let display_number = if question.display_number.trim().is_empty() {
            (index + 1).to_string()
        } else {
            question.display_number.clone()
        };

        block.push_str("Câu ");
        block.push_str(&display_number);
        block.push_str(": ");
        block.push_str(&question.text);
        block.push('\n');

        if question.question_type == QuestionType::MultipleChoice {
            for (opt_index, option) in question.options.iter().enumerate() {
                if *option == question.correct_answer {
                    block.push('*');
                }
                block.push(option_letter(opt_index));
                block.push_str(". ");
                block.push_str(option);
                block.push('\n');
            }
        }

        blocks.push(block);
    }

    blocks.join("\n")
}

/// 按位置分配选项字母
fn option_letter(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}
