//! # 对称操作行解析
//!
//! 从对称操作循环中的一行提取三个逗号分隔的坐标表达式。支持的写法：
//! ```text
//! x,y,z
//! 'x, y, z'
//! 2 -x+1/2,-y,z+1/2
//! 3 "-y, x-y, z+2/3"
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/cif.rs` 使用
//! - 使用 `symmetry/operator.rs` 编译表达式

use crate::error::{CifError, Result};
use crate::symmetry::SymmetryOperator;

use regex::Regex;
use std::sync::OnceLock;

fn symop_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"['"]?(-?[A-Za-z\d./+*()-]+,\s?-?[A-Za-z\d./+*()-]+,\s?-?[A-Za-z\d./+*()-]+)['"]?"#,
        )
        .unwrap()
    })
}

/// 提取三个坐标表达式字符串
pub fn extract_components(line: &str, line_no: usize) -> Result<[String; 3]> {
    let malformed = || CifError::MalformedSymmetryLine {
        line: line_no,
        content: line.trim().to_string(),
    };

    let caps = symop_pattern().captures(line).ok_or_else(malformed)?;
    let triple = caps
        .get(1)
        .ok_or_else(malformed)?
        .as_str()
        .replace(['\'', '"'], "");

    let parts: Vec<&str> = triple.split(',').map(|s| s.trim()).collect();
    match parts.as_slice() {
        [x, y, z] => Ok([x.to_string(), y.to_string(), z.to_string()]),
        _ => Err(malformed()),
    }
}

/// 解析对称操作行并编译为 `SymmetryOperator`
pub fn parse_symmetry_line(line: &str, line_no: usize) -> Result<SymmetryOperator> {
    let [x, y, z] = extract_components(line, line_no)?;
    SymmetryOperator::new(&x, &y, &z)
}
