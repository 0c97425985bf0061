//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量题集处理器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 批量加载画布文件（Vec<CanvasFile>）
//! - 控制并发数量（Semaphore）
//! - 持有存储客户端（HttpQuestionStore）
//! - 输出全局统计信息
//!
//! ### `set_processor` - 单个题集处理器
//! - 读取单个画布文件并解析
//! - 空画布时从存储端反向注水
//! - 调用 SyncFlow 执行同步
//! - 输出单个题集的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<CanvasFile>)
//!     ↓
//! set_processor (处理单个 CanvasFile)
//!     ↓
//! workflow::SyncFlow (比对 + 原子提交)
//!     ↓
//! services (能力层：parse / serialize / autocomplete / import)
//!     ↓
//! infrastructure (基础设施：TextCanvas)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，set_processor 管单个
//! 2. **资源隔离**：只有编排层持有存储客户端
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;
pub mod set_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use set_processor::{process_set, SetOutcome};
