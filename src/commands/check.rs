//! # check 命令实现
//!
//! 解析 CIF 中的对称操作，交给外部空间群校验程序判断是否等价于指定空间群。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `parsers/cif.rs`, `symmetry/oracle.rs`
//! - 使用 `utils/output.rs`

use crate::cli::check::CheckArgs;
use crate::error::{CifError, Result};
use crate::parsers;
use crate::symmetry::oracle::validate_space_group;
use crate::symmetry::{ExternalCommandOracle, SpaceGroupOracle, Tolerance};
use crate::utils::output;

/// 执行 check 命令
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header(&format!("Space Group Check (No. {})", args.space_group));

    let space_group = validate_space_group(args.space_group)?;

    if !args.input.is_file() {
        return Err(CifError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let structure = parsers::parse_cif_file(&args.input, Tolerance::default())?;
    super::report_parse_stats(&structure);

    if structure.operators.is_empty() {
        return Err(CifError::InvalidArgument(format!(
            "'{}' contains no symmetry operators",
            args.input.display()
        )));
    }

    output::print_info(&format!(
        "Checking {} operator(s) with '{}'",
        structure.operators.len(),
        args.oracle
    ));

    let oracle = ExternalCommandOracle::new(&args.oracle);
    if oracle.is_equivalent(&structure.operators, space_group)? {
        output::print_success(&format!(
            "Operators of '{}' match space group {}",
            structure.name, space_group
        ));
    } else {
        output::print_warning(&format!(
            "Operators of '{}' do not match space group {}",
            structure.name, space_group
        ));
    }

    Ok(())
}
