//! # 对称操作
//!
//! 一个对称操作由三个坐标表达式组成，例如 `(-y+1/2, x, z)`。
//! 表达式在构造时即编译为语法树，非法表达式在解析阶段直接报错。
//!
//! ## 依赖关系
//! - 被 `parsers/symop.rs`, `symmetry/expand.rs`, `symmetry/oracle.rs` 使用
//! - 使用 `symmetry/expr.rs`

use super::expr::Expr;
use crate::error::Result;

use serde::Serialize;

/// 对称操作 (exprX, exprY, exprZ)
#[derive(Debug, Clone, Serialize)]
pub struct SymmetryOperator {
    /// 原始表达式字符串
    pub components: [String; 3],

    #[serde(skip)]
    exprs: [Expr; 3],
}

impl SymmetryOperator {
    /// 从三个表达式字符串构造，逐个编译
    pub fn new(x: &str, y: &str, z: &str) -> Result<Self> {
        let components = [x.trim().to_string(), y.trim().to_string(), z.trim().to_string()];
        let exprs = [
            Expr::parse(&components[0])?,
            Expr::parse(&components[1])?,
            Expr::parse(&components[2])?,
        ];
        Ok(SymmetryOperator { components, exprs })
    }

    /// 恒等操作 x,y,z
    pub fn identity() -> Self {
        use super::expr::Axis;
        SymmetryOperator {
            components: ["x".to_string(), "y".to_string(), "z".to_string()],
            exprs: [Expr::Var(Axis::X), Expr::Var(Axis::Y), Expr::Var(Axis::Z)],
        }
    }

    /// 作用于分数坐标（不做周期归约）
    pub fn apply(&self, position: [f64; 3]) -> Result<[f64; 3]> {
        Ok([
            self.exprs[0].eval(position)?,
            self.exprs[1].eval(position)?,
            self.exprs[2].eval(position)?,
        ])
    }

    /// 以 CIF 常用的 `x,y,z` 形式输出
    pub fn as_xyz(&self) -> String {
        self.components.join(",")
    }
}

impl std::fmt::Display for SymmetryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_xyz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_operator() {
        let op = SymmetryOperator::new("-y+1/2", "x", "z-1").unwrap();
        let p = op.apply([0.1, 0.2, 0.3]).unwrap();
        assert!((p[0] - 0.3).abs() < 1e-12);
        assert!((p[1] - 0.1).abs() < 1e-12);
        assert!((p[2] + 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_identity_matches_parsed() {
        let parsed = SymmetryOperator::new("x", " y", "z ").unwrap();
        let identity = SymmetryOperator::identity();
        assert_eq!(parsed.as_xyz(), identity.as_xyz());
        assert_eq!(
            parsed.apply([0.3, 0.6, 0.9]).unwrap(),
            identity.apply([0.3, 0.6, 0.9]).unwrap()
        );
    }

    #[test]
    fn test_invalid_component_rejected() {
        assert!(SymmetryOperator::new("x", "y", "w").is_err());
    }
}
