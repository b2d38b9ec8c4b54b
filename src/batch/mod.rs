//! # 批量处理模块
//!
//! 对目录中的多个 CIF 文件并行执行解析与导出。
//!
//! ## 功能
//! - 按 glob 模式收集文件
//! - 基于 rayon 的并行处理
//! - 进度反馈与失败汇总
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
