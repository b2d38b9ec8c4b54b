//! # 晶胞参数提取
//!
//! 从 `_cell_length_*` / `_cell_angle_*` 行提取晶胞参数：
//! ```text
//! _cell_length_a     5.4307(2)
//! _cell_angle_alpha  90
//! ```
//! 取行尾最后一个字段，去掉不确定度后缀后解析为浮点数。
//!
//! ## 依赖关系
//! - 被 `parsers/cif.rs` 使用

use super::parse_number;
use crate::error::{CifError, Result};

/// 识别的晶胞参数标签前缀
pub const LATTICE_TAGS: [&str; 6] = [
    "_cell_length_a",
    "_cell_length_b",
    "_cell_length_c",
    "_cell_angle_alpha",
    "_cell_angle_beta",
    "_cell_angle_gamma",
];

/// 行是否以晶胞参数标签开头
pub fn is_lattice_line(line: &str) -> bool {
    LATTICE_TAGS.iter().any(|tag| line.starts_with(tag))
}

/// 解析晶胞参数行的数值
pub fn parse_lattice_value(line: &str, line_no: usize) -> Result<f64> {
    let token = line
        .split_whitespace()
        .last()
        .ok_or_else(|| CifError::InvalidNumber {
            line: line_no,
            token: String::new(),
        })?;
    parse_number(token, line_no)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_tags() {
        assert!(is_lattice_line("_cell_length_a 5.43"));
        assert!(is_lattice_line("_cell_angle_gamma   120.0"));
        assert!(!is_lattice_line("_cell_volume 160.1"));
        assert!(!is_lattice_line(" _cell_length_a 5.43"));
    }

    #[test]
    fn test_parse_value_with_uncertainty() {
        let v = parse_lattice_value("_cell_length_a     5.4307(2)", 3).unwrap();
        assert!((v - 5.4307).abs() < 1e-12);
        assert_eq!(parse_lattice_value("_cell_angle_beta 90", 4).unwrap(), 90.0);
    }

    #[test]
    fn test_missing_value_is_error() {
        assert!(matches!(
            parse_lattice_value("_cell_length_b", 5),
            Err(CifError::InvalidNumber { line: 5, .. })
        ));
    }
}
