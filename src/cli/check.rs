//! # check 子命令 CLI 定义
//!
//! 校验 CIF 中的对称操作是否等价于指定空间群。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::Args;
use std::path::PathBuf;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input CIF file
    pub input: PathBuf,

    /// Space group number (1-230)
    #[arg(short, long)]
    pub space_group: u32,

    /// External command that answers the equivalence question
    #[arg(long, env = "CIFEXPAND_ORACLE", default_value = "sgcheck")]
    pub oracle: String,
}
