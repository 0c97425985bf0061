//! 批量题集处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量画布文件的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建存储客户端
//! 2. **批量加载**：扫描并加载所有画布文件（`Vec<CanvasFile>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将题集分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有题集的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个题集的细节
//! - **资源所有者**：唯一持有存储客户端的模块
//! - **串行保证**：每个画布文件只由一个任务处理，
//!   同一场考试不会有并发同步；并发只发生在不同考试之间
//! - **向下委托**：委托 set_processor 处理单个题集

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::HttpQuestionStore;
use crate::config::Config;
use crate::models::loaders::{load_all_canvas_files, CanvasFile};
use crate::orchestrator::set_processor;
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_sets_loaded, log_startup,
    print_final_stats,
};

/// 应用主结构
pub struct App {
    config: Config,
    store: HttpQuestionStore,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(config.max_concurrent_sets);

        // 创建存储客户端
        let store = HttpQuestionStore::new(&config);

        Ok(Self { config, store })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有画布文件
        let all_sets = self.load_sets().await?;

        if all_sets.is_empty() {
            warn!("⚠️ 没有找到画布文件，程序结束");
            return Ok(());
        }

        let total_sets = all_sets.len();
        log_sets_loaded(total_sets, self.config.max_concurrent_sets);

        // 处理所有题集
        let stats = self.process_all_sets(all_sets).await?;

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载画布文件
    async fn load_sets(&self) -> Result<Vec<CanvasFile>> {
        info!("\n📁 正在扫描画布文件...");
        load_all_canvas_files(&self.config.canvas_folder).await
    }

    /// 处理所有题集
    async fn process_all_sets(&self, all_sets: Vec<CanvasFile>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_sets));
        let total_sets = all_sets.len();
        let mut stats = ProcessingStats {
            total: total_sets,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total_sets).step_by(self.config.max_concurrent_sets) {
            let batch_end = (batch_start + self.config.max_concurrent_sets).min(total_sets);
            let batch_sets = &all_sets[batch_start..batch_end];
            let batch_num = (batch_start / self.config.max_concurrent_sets) + 1;
            let total_batches = (total_sets + self.config.max_concurrent_sets - 1)
                / self.config.max_concurrent_sets;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_sets,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_sets, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;

            log_batch_complete(
                batch_num,
                batch_result.success,
                batch_result.success + batch_result.failed,
            );
        }

        Ok(stats)
    }

    /// 处理单个批次
    ///
    /// 批内按题集并发，同一题集始终只有一个任务，
    /// 天然满足"同一考试不允许并发同步"的约束
    async fn process_batch(
        &self,
        batch_sets: &[CanvasFile],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        for (idx, set) in batch_sets.iter().enumerate() {
            let set_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            // reqwest::Client 内部使用 Arc，clone 是廉价的
            let store = self.store.clone();
            let set_clone = set.clone();
            let config_clone = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match set_processor::process_set(&store, set_clone, set_index, &config_clone).await
                {
                    Ok(outcome) => Ok(outcome),
                    Err(e) => {
                        error!("[题集 {}] ❌ 处理过程中发生错误: {}", set_index, e);
                        Err(e)
                    }
                }
            });
            batch_handles.push((set_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (set_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(_)) => {
                    result.success += 1;
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[题集 {}] 任务执行失败: {}", set_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
}
