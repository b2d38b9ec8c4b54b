//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `inspect`: 解析单个 CIF 并打印晶胞参数、对称操作与展开后的原子位置
//! - `expand`: 展开原子位置并导出 (CSV/JSON/XYZ)，支持批量目录
//! - `check`: 通过外部程序校验对称操作是否对应指定空间群
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: inspect, expand, check

pub mod check;
pub mod expand;
pub mod inspect;

use crate::symmetry::Tolerance;
use clap::{Args, Parser, Subcommand};

/// cifexpand - CIF 对称展开工具
#[derive(Parser)]
#[command(name = "cifexpand")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Expand CIF asymmetric units into full unit-cell atomic positions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print per-stage parsing diagnostics
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a CIF file and print lattice, operators and expanded positions
    Inspect(inspect::InspectArgs),

    /// Expand CIF files and export unique positions (CSV/JSON/XYZ)
    Expand(expand::ExpandArgs),

    /// Ask an external oracle whether the operators match a space group
    Check(check::CheckArgs),
}

/// 去重容差参数
#[derive(Args, Debug, Clone, Copy)]
pub struct ToleranceArgs {
    /// Relative tolerance for duplicate detection
    #[arg(long, default_value_t = 1e-5)]
    pub rtol: f64,

    /// Absolute tolerance for duplicate detection
    #[arg(long, default_value_t = 1e-8)]
    pub atol: f64,
}

impl ToleranceArgs {
    pub fn to_tolerance(self) -> Tolerance {
        Tolerance::new(self.rtol, self.atol)
    }
}
