//! # 解析器模块
//!
//! CIF 文件的逐行扫描解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/`, `symmetry/`
//! - 子模块: cif (行分类状态机), atom_site (列映射), lattice (晶胞参数), symop (对称操作)

pub mod atom_site;
pub mod cif;
pub mod lattice;
pub mod symop;

pub use cif::{parse_cif_content, parse_cif_file};

use crate::error::{CifError, Result};

/// 去掉不确定度后缀：`0.250(3)` -> `0.250`
pub fn strip_uncertainty(token: &str) -> &str {
    match token.find('(') {
        Some(idx) => &token[..idx],
        None => token,
    }
}

/// 解析带不确定度后缀的数值，`nan` / `inf` 等非有限值视为非法
pub fn parse_number(token: &str, line: usize) -> Result<f64> {
    let invalid = || CifError::InvalidNumber {
        line,
        token: token.to_string(),
    };

    let value = strip_uncertainty(token)
        .parse::<f64>()
        .map_err(|_| invalid())?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}
