//! # Question Canvas Sync
//!
//! 一个把自由文本题目画布同步到远端题库的 Rust 应用程序
//!
//! 作者在纯文本画布上书写题目，系统负责把画布内容与远端题目
//! 集合保持一致：不需要管理ID、不需要关心顺序、不需要手动发
//! 增删改操作。画布语法没有ID，解析结果与存储端题目按题干内
//! 容精确匹配对应。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（画布文本缓冲区），只暴露能力
//! - `TextCanvas` - 唯一的缓冲区 owner，提供编辑/解析/注水能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份题集文本
//! - `QuestionParser` - 画布文本解析能力
//! - `serializer` - 存储端题目还原为画布文本的能力
//! - `OptionAutoCompletion` - 选项行脚手架补全能力
//! - `import` - 表格行转画布文本的能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份题集"的完整同步流程
//! - `SyncCtx` - 上下文封装（exam_id + set_index）
//! - `SyncFlow` - 流程编排（校验 → 拉取 → 比对 → 原子提交）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量题集处理器，管理资源和并发
//! - `orchestrator/set_processor` - 单个题集处理器，注水或同步
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpQuestionStore, MemoryQuestionStore, QuestionStore};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::TextCanvas;
pub use models::question::{ParsedQuestion, QuestionType, StoredQuestion};
pub use models::sync_plan::SyncPlan;
pub use orchestrator::{process_set, App, SetOutcome};
pub use services::{rows_to_canvas_text, serialize_questions, OptionAutoCompletion, QuestionParser};
pub use workflow::{SyncCtx, SyncFlow, SyncOutcome};
