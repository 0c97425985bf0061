//! 题集同步流程 - 流程层
//!
//! 核心职责：定义"一份题集"的完整同步流程
//!
//! 流程顺序：
//! 1. 前置校验（空题集拒绝同步）
//! 2. 拉取存储端现状
//! 3. 内容寻址比对 → SyncPlan
//! 4. 原子批量提交
//!
//! 画布语法没有任何ID，解析结果与存储端题目之间唯一可靠的
//! 对应关系就是题干内容的精确相等。比对因此按题干做一趟贪心
//! 匹配，而不是常见的按ID upsert；题干重复的题目会任意配对，
//! 这是已知并接受的限制

use tracing::{info, warn};

use crate::clients::store_client::QuestionStore;
use crate::config::Config;
use crate::error::{AppError, AppResult, BusinessError};
use crate::models::question::{ParsedQuestion, StoredQuestion};
use crate::models::sync_plan::{CreateOp, DeleteOp, SyncPlan, UpdateOp};
use crate::workflow::sync_ctx::SyncCtx;

/// 题集同步结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// 已提交批量操作
    Applied {
        creates: usize,
        updates: usize,
        deletes: usize,
    },
    /// 与存储端一致，无需任何操作
    UpToDate,
}

/// 题集同步流程
///
/// - 编排完整的同步流程
/// - 不持有存储客户端，按调用传入
/// - 比对本身是纯函数，可单独测试
pub struct SyncFlow {
    verbose_logging: bool,
}

impl SyncFlow {
    /// 创建新的同步流程
    pub fn new(config: &Config) -> Self {
        Self {
            verbose_logging: config.verbose_logging,
        }
    }

    /// 执行一次完整同步
    ///
    /// # 参数
    /// - `store`: 题目存储
    /// - `ctx`: 同步上下文
    /// - `parsed`: 画布解析结果
    ///
    /// # 返回
    /// 提交失败时整体报错，不重试、不部分提交；
    /// 调用方解决底层原因后从头重新发起同步
    pub async fn run<S: QuestionStore>(
        &self,
        store: &S,
        ctx: &SyncCtx,
        parsed: &[ParsedQuestion],
    ) -> AppResult<SyncOutcome> {
        if ctx.exam_id.is_empty() {
            return Err(AppError::Business(BusinessError::EmptyExamId));
        }
        // 空题集是前置条件失败，不是"删光所有题目"的指令
        if parsed.is_empty() {
            return Err(AppError::Business(BusinessError::NothingToSync));
        }

        info!("[题集 {}] 🔍 正在拉取存储端题目...", ctx.set_index);
        let stored = store.list(&ctx.exam_id).await?;
        info!(
            "[题集 {}] ✓ 存储端现有 {} 道题目",
            ctx.set_index,
            stored.len()
        );

        let plan = self.plan(parsed, &stored);

        if plan.is_empty() {
            info!("[题集 {}] ✓ 内容无变化，无需同步", ctx.set_index);
            return Ok(SyncOutcome::UpToDate);
        }

        if self.verbose_logging {
            self.log_plan(ctx, &plan);
        }

        info!(
            "[题集 {}] 📤 正在提交 {} 个操作...",
            ctx.set_index,
            plan.op_count()
        );
        store.batch_apply(&ctx.exam_id, &plan).await?;

        info!(
            "[题集 {}] ✓ 批量提交成功 (新增 {} 更新 {} 删除 {})",
            ctx.set_index,
            plan.creates.len(),
            plan.updates.len(),
            plan.deletes.len()
        );

        Ok(SyncOutcome::Applied {
            creates: plan.creates.len(),
            updates: plan.updates.len(),
            deletes: plan.deletes.len(),
        })
    }

    /// 比对解析结果与存储端现状，产出最小操作集
    ///
    /// 单趟贪心匹配：
    /// 1. 规范题号按当前文本位置重新生成（作者书写的题号只是装饰）
    /// 2. 在未匹配池中找第一个题干完全相等的存储端题目；
    ///    找到则逐字段比较，有差异发更新，并把它移出池子
    /// 3. 找不到则发新建
    /// 4. 处理完后池中剩下的全部发删除
    pub fn plan(&self, parsed: &[ParsedQuestion], stored: &[StoredQuestion]) -> SyncPlan {
        let mut pool: Vec<&StoredQuestion> = stored.iter().collect();
        let mut plan = SyncPlan::default();

        for (index, question) in parsed.iter().enumerate() {
            let display_number = (index + 1).to_string();

            match pool.iter().position(|s| s.text == question.text) {
                Some(pos) => {
                    let matched = pool.remove(pos);
                    if Self::fields_differ(question, &display_number, matched) {
                        plan.updates.push(UpdateOp {
                            id: matched.id.clone(),
                            question: question.to_payload(display_number),
                        });
                    }
                }
                None => {
                    plan.creates.push(CreateOp {
                        question: question.to_payload(display_number),
                    });
                }
            }
        }

        for leftover in pool {
            plan.deletes.push(DeleteOp {
                id: leftover.id.clone(),
            });
        }

        plan
    }

    /// 逐字段比较（题干已经相等，不再比较）
    fn fields_differ(
        parsed: &ParsedQuestion,
        display_number: &str,
        stored: &StoredQuestion,
    ) -> bool {
        stored.display_number != display_number
            || stored.options != parsed.options
            || stored.correct_answer != parsed.correct_answer
            || stored.points != parsed.points
    }

    /// 显示操作明细
    fn log_plan(&self, ctx: &SyncCtx, plan: &SyncPlan) {
        for op in &plan.creates {
            info!(
                "[题集 {}]   + 新建: {}",
                ctx.set_index,
                crate::utils::logging::truncate_text(&op.question.text, 40)
            );
        }
        for op in &plan.updates {
            info!(
                "[题集 {}]   ~ 更新 {}: {}",
                ctx.set_index,
                op.id,
                crate::utils::logging::truncate_text(&op.question.text, 40)
            );
        }
        for op in &plan.deletes {
            warn!("[题集 {}]   - 删除 {}", ctx.set_index, op.id);
        }
    }
}
