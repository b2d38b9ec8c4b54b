//! # 原子位置表列映射
//!
//! 读取 atom_site 循环的列声明，按列名确定标签与分数坐标所在的列：
//! ```text
//! loop_
//! _atom_site_label
//! _atom_site_type_symbol
//! _atom_site_fract_x
//! _atom_site_fract_y
//! _atom_site_fract_z
//! Si1 Si 0.0 0.0 0.0
//! ```
//! 列的声明顺序任意，但四个列必须全部声明。
//!
//! ## 依赖关系
//! - 被 `parsers/cif.rs` 使用
//! - 使用 `models/structure.rs`

use super::{parse_number, strip_uncertainty};
use crate::error::{CifError, Result};
use crate::models::RawAtomSite;

/// atom_site 表中需要的列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteField {
    Label,
    FractX,
    FractY,
    FractZ,
}

impl SiteField {
    pub fn from_header(tag: &str) -> Option<Self> {
        match tag {
            "_atom_site_label" => Some(SiteField::Label),
            "_atom_site_fract_x" => Some(SiteField::FractX),
            "_atom_site_fract_y" => Some(SiteField::FractY),
            "_atom_site_fract_z" => Some(SiteField::FractZ),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            SiteField::Label => "_atom_site_label",
            SiteField::FractX => "_atom_site_fract_x",
            SiteField::FractY => "_atom_site_fract_y",
            SiteField::FractZ => "_atom_site_fract_z",
        }
    }
}

/// 逐行收集列声明
#[derive(Debug, Default, Clone)]
pub struct ColumnMapper {
    label: Option<usize>,
    x: Option<usize>,
    y: Option<usize>,
    z: Option<usize>,
}

impl ColumnMapper {
    /// 记录一条列声明，`index` 为该列在循环中的位置
    pub fn declare(&mut self, header_line: &str, index: usize) {
        let tag = header_line.split_whitespace().next().unwrap_or("");
        let slot = match SiteField::from_header(tag) {
            Some(SiteField::Label) => &mut self.label,
            Some(SiteField::FractX) => &mut self.x,
            Some(SiteField::FractY) => &mut self.y,
            Some(SiteField::FractZ) => &mut self.z,
            None => return,
        };
        *slot = Some(index);
    }

    /// 确认四个列均已声明
    pub fn resolve(&self) -> Result<ColumnMap> {
        let require = |slot: Option<usize>, field: SiteField| {
            slot.ok_or_else(|| CifError::MissingAtomSiteColumn {
                field: field.tag().to_string(),
            })
        };

        Ok(ColumnMap {
            label: require(self.label, SiteField::Label)?,
            x: require(self.x, SiteField::FractX)?,
            y: require(self.y, SiteField::FractY)?,
            z: require(self.z, SiteField::FractZ)?,
        })
    }
}

/// 已确定的列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub label: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl ColumnMap {
    /// 解析一行原子数据
    pub fn parse_row(&self, line: &str, line_no: usize) -> Result<RawAtomSite> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let column = |idx: usize| {
            tokens
                .get(idx)
                .copied()
                .ok_or_else(|| CifError::MalformedAtomSiteRow {
                    line: line_no,
                    reason: format!(
                        "expected at least {} columns, found {}",
                        idx + 1,
                        tokens.len()
                    ),
                })
        };

        let label = strip_uncertainty(column(self.label)?);
        let x = parse_number(column(self.x)?, line_no)?;
        let y = parse_number(column(self.y)?, line_no)?;
        let z = parse_number(column(self.z)?, line_no)?;

        let element = element_symbol(label, line_no)?;

        Ok(RawAtomSite::new(label, element, [x, y, z]))
    }
}

/// 标签开头的字母部分即元素符号："Si1" -> "Si"
pub fn element_symbol(label: &str, line_no: usize) -> Result<String> {
    let symbol: String = label
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if symbol.is_empty() {
        return Err(CifError::MalformedElementLabel {
            line: line_no,
            label: label.to_string(),
        });
    }

    Ok(symbol)
}
