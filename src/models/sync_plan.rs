//! 同步操作数据结构
//!
//! 一次同步产出的全部增/改/删操作封装为单个 SyncPlan，
//! 整体原子提交：要么全部生效，要么全部失败

use serde::{Deserialize, Serialize};

use crate::models::question::QuestionType;

/// 同步操作载荷：题目的全部语义字段
///
/// 时间戳不在载荷中，由存储端在提交时写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub display_number: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: u32,
}

/// 新建题目操作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOp {
    pub question: QuestionPayload,
}

/// 更新题目操作，以存储端ID定位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOp {
    pub id: String,
    pub question: QuestionPayload,
}

/// 删除题目操作，以存储端ID定位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOp {
    pub id: String,
}

/// 一次同步的全部操作
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncPlan {
    pub creates: Vec<CreateOp>,
    pub updates: Vec<UpdateOp>,
    pub deletes: Vec<DeleteOp>,
}

impl SyncPlan {
    /// 是否没有任何操作
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }

    /// 操作总数
    pub fn op_count(&self) -> usize {
        self.creates.len() + self.updates.len() + self.deletes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan() {
        let plan = SyncPlan::default();
        assert!(plan.is_empty());
        assert_eq!(plan.op_count(), 0);
    }

    #[test]
    fn test_op_count() {
        let payload = QuestionPayload {
            display_number: "1".to_string(),
            text: "题干".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec![],
            correct_answer: String::new(),
            points: 10,
        };
        let plan = SyncPlan {
            creates: vec![CreateOp {
                question: payload.clone(),
            }],
            updates: vec![UpdateOp {
                id: "q_1".to_string(),
                question: payload,
            }],
            deletes: vec![DeleteOp {
                id: "q_2".to_string(),
            }],
        };
        assert!(!plan.is_empty());
        assert_eq!(plan.op_count(), 3);
    }

    #[test]
    fn test_payload_type_serializes_as_snake_case() {
        let payload = QuestionPayload {
            display_number: "1".to_string(),
            text: "题干".to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec!["甲".to_string()],
            correct_answer: "甲".to_string(),
            points: 10,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "multiple_choice");
    }
}
