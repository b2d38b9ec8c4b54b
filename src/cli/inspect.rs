//! # inspect 子命令 CLI 定义
//!
//! 解析单个 CIF 文件并在终端打印结果。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use super::ToleranceArgs;
use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input CIF file
    pub input: PathBuf,

    /// Print the parsed symmetry operators
    #[arg(long, default_value_t = false)]
    pub operators: bool,

    /// Print Cartesian coordinates (Å) instead of fractional ones
    #[arg(long, default_value_t = false)]
    pub cartesian: bool,

    #[command(flatten)]
    pub tolerance: ToleranceArgs,
}
