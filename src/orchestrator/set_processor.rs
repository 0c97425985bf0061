//! 单个题集处理器 - 编排层
//!
//! 处理一份画布文件的完整生命周期：
//! 读取文本 → （画布为空则从存储端注水）→ 解析 → 同步 → 统计

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::clients::store_client::QuestionStore;
use crate::config::Config;
use crate::infrastructure::TextCanvas;
use crate::models::loaders::CanvasFile;
use crate::utils::logging::truncate_text;
use crate::workflow::{SyncCtx, SyncFlow, SyncOutcome};

/// 题集处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// 已同步到存储端
    Synced(SyncOutcome),
    /// 画布为空，已用存储端内容注水并写回文件
    Hydrated { questions: usize },
    /// 画布与存储端均无内容，跳过
    Skipped,
}

/// 处理单个题集
///
/// # 参数
/// - `store`: 题目存储
/// - `set`: 画布文件
/// - `set_index`: 题集索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回题集处理结果
pub async fn process_set<S: QuestionStore>(
    store: &S,
    set: CanvasFile,
    set_index: usize,
    config: &Config,
) -> Result<SetOutcome> {
    log_set_start(set_index, &set.exam_id);

    let mut canvas = TextCanvas::with_default_points(config.default_points);
    canvas.set_text(set.raw_text.clone());

    // 画布没有解析出任何题目：这不是"清空存储端"的指令
    if canvas.questions().is_empty() {
        if config.hydrate_empty_canvas {
            return hydrate_canvas(store, &mut canvas, &set, set_index).await;
        }
        warn!("[题集 {}] ⚠️ 画布没有可同步的题目，跳过", set_index);
        return Ok(SetOutcome::Skipped);
    }

    log_parsed_questions(set_index, &canvas, config.verbose_logging);

    let ctx = SyncCtx::new(set.exam_id.clone(), set_index);
    let flow = SyncFlow::new(config);
    let outcome = flow.run(store, &ctx, canvas.questions()).await?;

    info!("[题集 {}] ✅ 题集处理完成\n", set_index);

    Ok(SetOutcome::Synced(outcome))
}

/// 画布为空时从存储端反向注水
///
/// 取回该考试已有题目，序列化为画布文本并写回文件，
/// 作者下次打开文件即可继续编辑
async fn hydrate_canvas<S: QuestionStore>(
    store: &S,
    canvas: &mut TextCanvas,
    set: &CanvasFile,
    set_index: usize,
) -> Result<SetOutcome> {
    info!("[题集 {}] 📥 画布为空，从存储端注水...", set_index);

    let stored = store.list(&set.exam_id).await?;
    if stored.is_empty() {
        warn!("[题集 {}] ⚠️ 存储端也没有题目，跳过", set_index);
        return Ok(SetOutcome::Skipped);
    }

    canvas.hydrate(&stored);
    tokio::fs::write(&set.path, canvas.raw_text())
        .await
        .with_context(|| format!("无法写入画布文件: {}", set.path.display()))?;

    info!(
        "[题集 {}] ✓ 已写回 {} 道题目: {}",
        set_index,
        stored.len(),
        set.path.display()
    );

    Ok(SetOutcome::Hydrated {
        questions: stored.len(),
    })
}

// ========== 日志辅助函数 ==========

fn log_set_start(set_index: usize, exam_id: &str) {
    info!("\n[题集 {}] {}", set_index, "─".repeat(30));
    info!("[题集 {}] 开始处理", set_index);
    info!("[题集 {}] 考试ID: {}", set_index, exam_id);
}

fn log_parsed_questions(set_index: usize, canvas: &TextCanvas, verbose: bool) {
    info!(
        "[题集 {}] ✓ 解析出 {} 道题目",
        set_index,
        canvas.questions().len()
    );

    if verbose {
        for (i, question) in canvas.questions().iter().enumerate() {
            info!(
                "[题集 {}]   {}. {} ({} 个选项)",
                set_index,
                i + 1,
                truncate_text(&question.text, 40),
                question.options.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MemoryQuestionStore;
    use std::path::PathBuf;

    fn canvas_file(exam_id: &str, raw_text: &str, path: PathBuf) -> CanvasFile {
        CanvasFile {
            exam_id: exam_id.to_string(),
            path,
            raw_text: raw_text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_set_syncs_questions() {
        let store = MemoryQuestionStore::new();
        let config = Config::default();
        let set = canvas_file("exam_1", "Câu 1: 题干\n*A. 甲\nB. 乙", PathBuf::from("unused.txt"));

        let outcome = process_set(&store, set, 1, &config).await.unwrap();

        assert_eq!(
            outcome,
            SetOutcome::Synced(SyncOutcome::Applied {
                creates: 1,
                updates: 0,
                deletes: 0
            })
        );
        assert_eq!(store.snapshot("exam_1").len(), 1);
    }

    #[tokio::test]
    async fn test_empty_canvas_and_empty_store_skipped() {
        let store = MemoryQuestionStore::new();
        let config = Config::default();
        let set = canvas_file("exam_1", "", PathBuf::from("unused.txt"));

        let outcome = process_set(&store, set, 1, &config).await.unwrap();
        assert_eq!(outcome, SetOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_empty_canvas_hydrates_from_store() {
        let store = MemoryQuestionStore::new();
        let config = Config::default();

        // 先往存储端放一道题
        let seed = canvas_file("exam_1", "Câu 1: 题干\n*A. 甲", PathBuf::from("unused.txt"));
        process_set(&store, seed, 1, &config).await.unwrap();

        // 空画布触发注水并写回文件
        let dir = std::env::temp_dir();
        let path = dir.join("question_canvas_sync_hydrate_test.txt");
        let set = canvas_file("exam_1", "", path.clone());

        let outcome = process_set(&store, set, 2, &config).await.unwrap();
        assert_eq!(outcome, SetOutcome::Hydrated { questions: 1 });

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Câu 1: 题干"));
        assert!(written.contains("*A. 甲"));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_hydration_disabled_skips() {
        let store = MemoryQuestionStore::new();
        let config = Config {
            hydrate_empty_canvas: false,
            ..Config::default()
        };
        let set = canvas_file("exam_1", "   \n\n", PathBuf::from("unused.txt"));

        let outcome = process_set(&store, set, 1, &config).await.unwrap();
        assert_eq!(outcome, SetOutcome::Skipped);
    }
}
