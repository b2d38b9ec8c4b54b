//! # 数据模型模块
//!
//! 定义 CIF 解析结果与展开后原子位置的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `symmetry/` 和 `commands/` 使用
//! - 子模块: structure

pub mod structure;

pub use structure::{AtomicPositionSet, CifStructure, LatticeParameters, RawAtomSite};
