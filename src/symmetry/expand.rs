//! # 原子位置展开
//!
//! 将每个对称操作作用于不对称单元中的每个原子位置，结果归约到 [0,1)，
//! 并按元素用数值容差去重。
//!
//! 生成顺序：外层遍历对称操作，内层遍历该元素的原始位置。
//! 该顺序不是规范顺序，两次运行的操作顺序不同时结果顺序也会不同。
//!
//! ## 依赖关系
//! - 被 `parsers/cif.rs` 调用
//! - 使用 `symmetry/operator.rs`, `models/structure.rs`

use super::operator::SymmetryOperator;
use crate::error::Result;
use crate::models::{AtomicPositionSet, RawAtomSite};

use std::collections::BTreeMap;

/// 去重容差，判据为 `|a - b| <= atol + rtol * |b|`（逐分量）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Tolerance { rtol, atol }
    }

    /// `b` 为已存在的位置
    pub fn all_close(&self, a: &[f64; 3], b: &[f64; 3]) -> bool {
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() <= self.atol + self.rtol * y.abs())
    }
}

/// 归约到 [0,1)：`1.0 -> 0.0`，`-0.25 -> 0.75`
pub fn wrap_unit(value: f64) -> f64 {
    let r = value.rem_euclid(1.0);
    // 极小负数的 rem_euclid 会舍入为 1.0；同时去掉 -0.0
    if r >= 1.0 || r == 0.0 {
        0.0
    } else {
        r
    }
}

/// 按元素分组原始位置，元素内保持文件顺序
pub fn group_by_element(sites: &[RawAtomSite]) -> BTreeMap<String, Vec<[f64; 3]>> {
    let mut grouped: BTreeMap<String, Vec<[f64; 3]>> = BTreeMap::new();
    for site in sites {
        grouped
            .entry(site.element.clone())
            .or_default()
            .push(site.position);
    }
    grouped
}

/// 展开所有原子位置
pub fn expand_positions(
    sites: &[RawAtomSite],
    operators: &[SymmetryOperator],
    tolerance: Tolerance,
) -> Result<AtomicPositionSet> {
    let mut result = AtomicPositionSet::default();

    for (element, positions) in group_by_element(sites) {
        let mut unique: Vec<[f64; 3]> = Vec::new();

        for op in operators {
            for position in &positions {
                let raw = op.apply(*position)?;
                let candidate = [wrap_unit(raw[0]), wrap_unit(raw[1]), wrap_unit(raw[2])];

                if !unique
                    .iter()
                    .any(|existing| tolerance.all_close(&candidate, existing))
                {
                    unique.push(candidate);
                }
            }
        }

        result.insert(element, unique);
    }

    Ok(result)
}
