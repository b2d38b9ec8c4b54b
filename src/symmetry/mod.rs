//! # 对称性模块
//!
//! 坐标表达式求值、对称操作、原子位置展开与空间群校验接口。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: expr, operator, expand, oracle

pub mod expand;
pub mod expr;
pub mod operator;
pub mod oracle;

pub use expand::{expand_positions, Tolerance};
pub use operator::SymmetryOperator;
pub use oracle::{ExternalCommandOracle, SpaceGroupOracle};
