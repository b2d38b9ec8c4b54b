//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `symmetry/`, `utils/`
//! - 子模块: inspect, expand, check

pub mod check;
pub mod expand;
pub mod inspect;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::CifStructure;
use crate::utils::output;

/// 执行命令
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Expand(args) => expand::execute(args),
        Commands::Check(args) => check::execute(args),
    }
}

/// 打印解析统计（仅 --verbose）
pub(crate) fn report_parse_stats(structure: &CifStructure) {
    if !output::is_verbose() {
        return;
    }
    output::print_debug(&format!(
        "{}: {} lattice parameter(s), {} symmetry operator(s), {} asymmetric-unit site(s)",
        structure.name,
        structure.lattice_parameters.len(),
        structure.operators.len(),
        structure.sites.len()
    ));
    for (element, positions) in structure.unique_positions.iter() {
        output::print_debug(&format!("  {:<3} -> {} unique position(s)", element, positions.len()));
    }
}

/// 没有对称操作时不会生成任何位置
pub(crate) fn warn_if_unexpanded(structure: &CifStructure) {
    if structure.operators.is_empty() && !structure.sites.is_empty() {
        output::print_warning(&format!(
            "{}: no symmetry operators found, no positions were generated",
            structure.name
        ));
    }
}
