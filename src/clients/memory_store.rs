/// 内存存储实现
///
/// 测试与本地演练用的 QuestionStore 实现，完整遵守批量提交的
/// 原子语义：先整体校验，再整体落盘，校验失败时不产生任何修改
use crate::error::{AppError, AppResult};
use crate::models::question::StoredQuestion;
use crate::models::sync_plan::SyncPlan;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// 内存题目存储
#[derive(Default)]
pub struct MemoryQuestionStore {
    exams: Mutex<HashMap<String, Vec<StoredQuestion>>>,
    id_seq: AtomicU64,
}

impl MemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前某场考试的题目快照（测试断言用）
    pub fn snapshot(&self, exam_id: &str) -> Vec<StoredQuestion> {
        self.exams
            .lock()
            .expect("存储锁被毒化")
            .get(exam_id)
            .cloned()
            .unwrap_or_default()
    }

    fn next_id(&self) -> String {
        format!("q_{}", self.id_seq.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl super::store_client::QuestionStore for MemoryQuestionStore {
    async fn list(&self, exam_id: &str) -> AppResult<Vec<StoredQuestion>> {
        Ok(self.snapshot(exam_id))
    }

    async fn batch_apply(&self, exam_id: &str, plan: &SyncPlan) -> AppResult<()> {
        let mut exams = self.exams.lock().expect("存储锁被毒化");
        let questions = exams.entry(exam_id.to_string()).or_default();

        // 先整体校验：所有更新/删除的ID都必须存在
        for op in &plan.updates {
            if !questions.iter().any(|q| q.id == op.id) {
                return Err(AppError::batch_rejected(
                    exam_id,
                    format!("更新目标不存在: {}", op.id),
                ));
            }
        }
        for op in &plan.deletes {
            if !questions.iter().any(|q| q.id == op.id) {
                return Err(AppError::batch_rejected(
                    exam_id,
                    format!("删除目标不存在: {}", op.id),
                ));
            }
        }

        // 校验通过后整体落盘，时间戳由存储端写入
        let now = Utc::now();

        for op in &plan.updates {
            if let Some(question) = questions.iter_mut().find(|q| q.id == op.id) {
                question.display_number = op.question.display_number.clone();
                question.text = op.question.text.clone();
                question.question_type = op.question.question_type;
                question.options = op.question.options.clone();
                question.correct_answer = op.question.correct_answer.clone();
                question.points = op.question.points;
                question.updated_at = Some(now);
            }
        }

        for op in &plan.deletes {
            questions.retain(|q| q.id != op.id);
        }

        for op in &plan.creates {
            questions.push(StoredQuestion {
                id: self.next_id(),
                display_number: op.question.display_number.clone(),
                text: op.question.text.clone(),
                question_type: op.question.question_type,
                options: op.question.options.clone(),
                correct_answer: op.question.correct_answer.clone(),
                points: op.question.points,
                created_at: Some(now),
                updated_at: None,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::store_client::QuestionStore;
    use crate::models::question::QuestionType;
    use crate::models::sync_plan::{CreateOp, DeleteOp, QuestionPayload, UpdateOp};

    fn payload(number: &str, text: &str) -> QuestionPayload {
        QuestionPayload {
            display_number: number.to_string(),
            text: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            options: vec!["甲".to_string(), "乙".to_string()],
            correct_answer: "甲".to_string(),
            points: 10,
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamp() {
        tokio_test::block_on(async {
            let store = MemoryQuestionStore::new();
            let plan = SyncPlan {
                creates: vec![CreateOp {
                    question: payload("1", "题干"),
                }],
                ..Default::default()
            };

            store.batch_apply("exam_1", &plan).await.unwrap();

            let questions = store.list("exam_1").await.unwrap();
            assert_eq!(questions.len(), 1);
            assert!(!questions[0].id.is_empty());
            assert!(questions[0].created_at.is_some());
            assert!(questions[0].updated_at.is_none());
        });
    }

    #[test]
    fn test_update_and_delete() {
        tokio_test::block_on(async {
            let store = MemoryQuestionStore::new();
            store
                .batch_apply(
                    "exam_1",
                    &SyncPlan {
                        creates: vec![
                            CreateOp {
                                question: payload("1", "第一题"),
                            },
                            CreateOp {
                                question: payload("2", "第二题"),
                            },
                        ],
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            let questions = store.snapshot("exam_1");
            let plan = SyncPlan {
                updates: vec![UpdateOp {
                    id: questions[0].id.clone(),
                    question: payload("1", "第一题改"),
                }],
                deletes: vec![DeleteOp {
                    id: questions[1].id.clone(),
                }],
                ..Default::default()
            };
            store.batch_apply("exam_1", &plan).await.unwrap();

            let after = store.snapshot("exam_1");
            assert_eq!(after.len(), 1);
            assert_eq!(after[0].text, "第一题改");
            assert!(after[0].updated_at.is_some());
        });
    }

    #[test]
    fn test_rejected_batch_leaves_store_untouched() {
        tokio_test::block_on(async {
            let store = MemoryQuestionStore::new();
            store
                .batch_apply(
                    "exam_1",
                    &SyncPlan {
                        creates: vec![CreateOp {
                            question: payload("1", "第一题"),
                        }],
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            let before = store.snapshot("exam_1");

            // 新建 + 指向不存在ID的删除：整批拒绝，新建也不得生效
            let plan = SyncPlan {
                creates: vec![CreateOp {
                    question: payload("2", "第二题"),
                }],
                deletes: vec![DeleteOp {
                    id: "q_不存在".to_string(),
                }],
                ..Default::default()
            };
            assert!(store.batch_apply("exam_1", &plan).await.is_err());

            assert_eq!(store.snapshot("exam_1"), before);
        });
    }

    #[test]
    fn test_exams_are_isolated() {
        tokio_test::block_on(async {
            let store = MemoryQuestionStore::new();
            store
                .batch_apply(
                    "exam_1",
                    &SyncPlan {
                        creates: vec![CreateOp {
                            question: payload("1", "题干"),
                        }],
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert!(store.list("exam_2").await.unwrap().is_empty());
        });
    }
}
