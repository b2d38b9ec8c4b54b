//! # 晶体结构数据模型
//!
//! CIF 解析与展开的数据模型：
//! - `LatticeParameters`: 按文件出现顺序记录的晶胞参数
//! - `Lattice`: 由六个晶胞参数构造的晶格向量，用于体积与笛卡尔坐标
//! - `RawAtomSite`: 不对称单元中的原子位置
//! - `AtomicPositionSet`: 展开去重后的各元素原子位置
//! - `CifStructure`: 单个 CIF 文件的完整解析结果
//!
//! ## 依赖关系
//! - 被 `parsers/`, `symmetry/`, `commands/` 使用
//! - 使用 `symmetry/operator.rs`

use crate::symmetry::SymmetryOperator;

use serde::Serialize;
use std::collections::BTreeMap;

/// 晶胞参数序列
///
/// 顺序为标签在文件中出现的顺序，不强制为 (a, b, c, alpha, beta, gamma)。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LatticeParameters(Vec<f64>);

impl LatticeParameters {
    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 恰好六个参数时返回 (a, b, c, alpha, beta, gamma)
    pub fn as_tuple(&self) -> Option<(f64, f64, f64, f64, f64, f64)> {
        match self.0.as_slice() {
            &[a, b, c, alpha, beta, gamma] => Some((a, b, c, alpha, beta, gamma)),
            _ => None,
        }
    }

    /// 构造晶格向量
    pub fn to_lattice(&self) -> Option<Lattice> {
        self.as_tuple()
            .map(|(a, b, c, alpha, beta, gamma)| Lattice::from_parameters(a, b, c, alpha, beta, gamma))
    }
}

/// 晶格向量表示
#[derive(Debug, Clone, Serialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格参数 (a, b, c, alpha, beta, gamma) 创建晶格
    /// 角度单位：度
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let cos_gamma = gamma.to_radians().cos();
        let sin_gamma = gamma.to_radians().sin();

        let a_vec = [a, 0.0, 0.0];
        let b_vec = [b * cos_gamma, b * sin_gamma, 0.0];

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();

        Lattice {
            matrix: [a_vec, b_vec, [c1, c2, c3]],
        }
    }

    /// 晶胞体积 (Å³)
    pub fn volume(&self) -> f64 {
        let [a, b, c] = self.matrix;
        let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0]);
        det.abs()
    }

    /// 分数坐标转笛卡尔坐标
    pub fn frac_to_cart(&self, frac: [f64; 3]) -> [f64; 3] {
        let m = self.matrix;
        let mut cart = [0.0; 3];
        for (k, value) in cart.iter_mut().enumerate() {
            *value = frac[0] * m[0][k] + frac[1] * m[1][k] + frac[2] * m[2][k];
        }
        cart
    }
}

/// 不对称单元原子位置（CIF atom_site 表的一行）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawAtomSite {
    /// 原始标签，如 "Si1"
    pub label: String,

    /// 元素符号，标签开头的字母部分
    pub element: String,

    /// 分数坐标，保持文件中的原值（未归约）
    pub position: [f64; 3],
}

impl RawAtomSite {
    pub fn new(label: impl Into<String>, element: impl Into<String>, position: [f64; 3]) -> Self {
        RawAtomSite {
            label: label.into(),
            element: element.into(),
            position,
        }
    }
}

/// 展开去重后的原子位置，按元素符号排序
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AtomicPositionSet {
    positions: BTreeMap<String, Vec<[f64; 3]>>,
}

impl AtomicPositionSet {
    pub fn insert(&mut self, element: impl Into<String>, positions: Vec<[f64; 3]>) {
        self.positions.insert(element.into(), positions);
    }

    pub fn get(&self, element: &str) -> Option<&[[f64; 3]]> {
        self.positions.get(element).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[[f64; 3]])> {
        self.positions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// 晶胞内原子总数
    pub fn total_count(&self) -> usize {
        self.positions.values().map(|v| v.len()).sum()
    }

    /// 计算晶胞化学式，如 "Cl4Na4"
    pub fn formula(&self) -> String {
        self.positions
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(el, v)| {
                if v.len() == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, v.len())
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// 单个 CIF 文件的解析结果
#[derive(Debug, Clone, Serialize)]
pub struct CifStructure {
    /// 结构名称（文件名）
    pub name: String,

    /// 晶胞参数
    pub lattice_parameters: LatticeParameters,

    /// 不对称单元原子位置，文件顺序
    pub sites: Vec<RawAtomSite>,

    /// 对称操作，文件顺序
    pub operators: Vec<SymmetryOperator>,

    /// 展开后的原子位置
    pub unique_positions: AtomicPositionSet,
}

impl CifStructure {
    pub fn lattice(&self) -> Option<Lattice> {
        self.lattice_parameters.to_lattice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_parameters_order_preserved() {
        let mut params = LatticeParameters::default();
        assert!(params.is_empty());
        for v in [90.0, 5.0, 6.0] {
            params.push(v);
        }
        assert_eq!(params.values(), &[90.0, 5.0, 6.0]);
        assert!(params.as_tuple().is_none());
        assert!(params.to_lattice().is_none());
    }

    #[test]
    fn test_lattice_volume_cubic() {
        let lattice = Lattice::from_parameters(5.0, 5.0, 5.0, 90.0, 90.0, 90.0);
        assert!((lattice.volume() - 125.0).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_hexagonal() {
        let lattice = Lattice::from_parameters(3.0, 3.0, 5.0, 90.0, 90.0, 120.0);
        // V = a^2 c sin(120)
        let expected = 3.0 * 3.0 * 5.0 * 120f64.to_radians().sin();
        assert!((lattice.volume() - expected).abs() < 1e-6);

        let b = lattice.frac_to_cart([0.0, 1.0, 0.0]);
        assert!((b[0] + 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_frac_to_cart_cubic() {
        let lattice = Lattice::from_parameters(4.0, 4.0, 4.0, 90.0, 90.0, 90.0);
        let cart = lattice.frac_to_cart([0.5, 0.25, 1.0]);
        assert!((cart[0] - 2.0).abs() < 1e-9);
        assert!((cart[1] - 1.0).abs() < 1e-9);
        assert!((cart[2] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_set_formula() {
        let mut set = AtomicPositionSet::default();
        set.insert("Na", vec![[0.0; 3], [0.5, 0.5, 0.0], [0.5, 0.0, 0.5], [0.0, 0.5, 0.5]]);
        set.insert("Cl", vec![[0.5, 0.5, 0.5]]);

        assert_eq!(set.formula(), "ClNa4");
        assert_eq!(set.total_count(), 5);
        let elements: Vec<&str> = set.iter().map(|(el, _)| el).collect();
        assert_eq!(elements, vec!["Cl", "Na"]);
    }
}
