//! # expand 子命令 CLI 定义
//!
//! 展开 CIF 原子位置并导出，支持单文件和批量目录模式。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/expand.rs`

use super::ToleranceArgs;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 支持的导出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV table (element, x, y, z)
    Csv,
    /// JSON document with lattice, operators and positions
    Json,
    /// XYZ file with Cartesian coordinates
    Xyz,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xyz => "xyz",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// expand 子命令参数
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Input: CIF file or directory containing CIF files
    pub input: PathBuf,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Glob pattern for input files (batch mode, e.g., "*.cif,*.CIF")
    #[arg(long, default_value = "*.cif")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    #[command(flatten)]
    pub tolerance: ToleranceArgs,
}
