/// 表格导入桥
///
/// 把电子表格行数据转换为符合画布语法的文本，追加到编辑器缓冲区。
/// 行格式: [题干, 选项A, 选项B, 选项C, 选项D, 答案, 分值?]；
/// 表格文件本身的解码不在本系统范围内，这里只处理行到文本的映射

/// 答案列可识别的选项字母
const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// 把表格行转换为画布文本
///
/// # 参数
/// - `rows`: 行数据，首行若是表头会被跳过
///
/// # 返回
/// 符合画布语法的文本，调用方负责追加到编辑器缓冲区
pub fn rows_to_canvas_text(rows: &[Vec<String>]) -> String {
    let mut text = String::new();
    let mut question_count = 1;

    // 首行第一格包含表头关键词时跳过
    let start_index = if is_header_row(rows.first()) { 1 } else { 0 };

    for row in rows.iter().skip(start_index) {
        // 至少需要题干和一个选项
        if row.len() < 2 {
            continue;
        }

        let question = &row[0];
        if question.is_empty() {
            continue;
        }

        let option_cells: [Option<&String>; 4] = [row.get(1), row.get(2), row.get(3), row.get(4)];
        let answer_letter = normalize_answer(row.get(5), &option_cells);

        text.push_str("Câu ");
        text.push_str(&question_count.to_string());
        text.push_str(": ");
        text.push_str(question);
        text.push('\n');

        for (index, cell) in option_cells.iter().enumerate() {
            let option = match cell {
                Some(o) if !o.is_empty() => o,
                _ => continue,
            };
            let letter = OPTION_LETTERS[index];
            if answer_letter == Some(letter) {
                text.push('*');
            }
            text.push(letter);
            text.push_str(". ");
            text.push_str(option);
            text.push('\n');
        }

        text.push('\n');
        question_count += 1;
    }

    text
}

/// 首行是否为表头
fn is_header_row(first_row: Option<&Vec<String>>) -> bool {
    let first_cell = match first_row.and_then(|row| row.first()) {
        Some(cell) => cell.to_lowercase(),
        None => return false,
    };
    first_cell.contains("question") || first_cell.contains("câu hỏi") || first_cell.contains("stt")
}

/// 归一化答案列
///
/// 答案可以是字母、1–4 的数字、或选项内容本身（不区分大小写匹配）；
/// 识别不出来则整题不加 '*' 标记
fn normalize_answer(
    answer_cell: Option<&String>,
    option_cells: &[Option<&String>; 4],
) -> Option<char> {
    let answer = answer_cell?.trim().to_uppercase();
    if answer.is_empty() {
        return None;
    }

    let letter = match answer.as_str() {
        "1" => "A".to_string(),
        "2" => "B".to_string(),
        "3" => "C".to_string(),
        "4" => "D".to_string(),
        other => other.to_string(),
    };

    if letter.len() == 1 && OPTION_LETTERS.contains(&(letter.as_bytes()[0] as char)) {
        return letter.chars().next();
    }

    // 不是字母：尝试与选项内容做不区分大小写的比对
    for (index, cell) in option_cells.iter().enumerate() {
        if let Some(option) = cell {
            if !option.is_empty() && answer == option.trim().to_uppercase() {
                return Some(OPTION_LETTERS[index]);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parser::QuestionParser;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_letter_answer_marks_option() {
        let rows = vec![row(&["2+2=?", "3", "4", "5", "6", "B", "10"])];
        let text = rows_to_canvas_text(&rows);

        assert_eq!(text, "Câu 1: 2+2=?\nA. 3\n*B. 4\nC. 5\nD. 6\n\n");
    }

    #[test]
    fn test_digit_answer_mapped_to_letter() {
        let rows = vec![row(&["题干", "甲", "乙", "丙", "丁", "3"])];
        let text = rows_to_canvas_text(&rows);
        assert!(text.contains("*C. 丙"));
    }

    #[test]
    fn test_text_answer_matched_case_insensitively() {
        let rows = vec![row(&["Capital?", "hanoi", "hue", "", "", "HANOI"])];
        let text = rows_to_canvas_text(&rows);
        assert!(text.contains("*A. hanoi"));
        assert!(text.contains("B. hue"));
    }

    #[test]
    fn test_unrecognized_answer_yields_no_marker() {
        let rows = vec![row(&["题干", "甲", "乙", "丙", "丁", "戊"])];
        let text = rows_to_canvas_text(&rows);
        assert!(!text.contains('*'));
    }

    #[test]
    fn test_header_row_skipped() {
        let rows = vec![
            row(&["Question", "Option A", "Option B", "Option C", "Option D", "Answer", "Points"]),
            row(&["题干", "甲", "乙", "", "", "A"]),
        ];
        let text = rows_to_canvas_text(&rows);

        assert!(!text.contains("Option A"));
        assert!(text.starts_with("Câu 1: 题干"));
    }

    #[test]
    fn test_vietnamese_header_token() {
        let rows = vec![row(&["Câu hỏi", "A", "B", "C", "D", "Đáp án"]), row(&["题干", "甲", "", "", "", "A"])];
        let text = rows_to_canvas_text(&rows);
        assert!(text.starts_with("Câu 1: 题干"));
    }

    #[test]
    fn test_short_or_empty_rows_skipped() {
        let rows = vec![row(&["孤题干"]), row(&["", "甲", "乙"]), row(&["题干", "甲"])];
        let text = rows_to_canvas_text(&rows);

        // 前两行被跳过，序号从 1 开始且只有一题
        assert_eq!(text, "Câu 1: 题干\nA. 甲\n\n");
    }

    #[test]
    fn test_missing_option_keeps_letters_fixed() {
        // 选项B缺失时，C、D 的字母不前移
        let rows = vec![row(&["题干", "甲", "", "丙", "丁", "C"])];
        let text = rows_to_canvas_text(&rows);

        assert!(text.contains("A. 甲"));
        assert!(!text.contains("B. "));
        assert!(text.contains("*C. 丙"));
        assert!(text.contains("D. 丁"));
    }

    #[test]
    fn test_sequential_numbering() {
        let rows = vec![
            row(&["第一题", "甲", "乙", "", "", "A"]),
            row(&["第二题", "丙", "丁", "", "", "B"]),
        ];
        let text = rows_to_canvas_text(&rows);
        assert!(text.contains("Câu 1: 第一题"));
        assert!(text.contains("Câu 2: 第二题"));
    }

    #[test]
    fn test_output_parses_under_canvas_grammar() {
        let rows = vec![row(&["2+2=?", "3", "4", "5", "6", "B", "10"])];
        let questions = QuestionParser::new().parse(&rows_to_canvas_text(&rows));

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "2+2=?");
        assert_eq!(questions[0].options, vec!["3", "4", "5", "6"]);
        assert_eq!(questions[0].correct_answer, "4");
    }
}
