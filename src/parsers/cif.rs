//! # CIF 格式解析器
//!
//! 逐行扫描 CIF 文件，提取晶胞参数、不对称单元原子位置与对称操作，
//! 随后通过对称操作展开得到晶胞内全部原子位置。
//!
//! ## 行分类状态机
//! ```text
//! _space_group_symop_operation_xyz / _symmetry_equiv_pos_as_xyz -> Symmetry
//! _atom_site_label                                              -> AtomSite
//! loop_ / 空行                                                  -> None
//! ```
//! - `AtomSite`: 含 `_` 的行为列声明，其余为数据行
//! - `Symmetry`: 每行为一个对称操作（同一循环的其他列声明跳过）
//! - 非 `Symmetry` 状态下识别 `_cell_length_*` / `_cell_angle_*`
//! - 以 `#` 开头的注释行忽略
//!
//! 仅支持 CIF 的一个子集：不支持多行文本字段，也不做单位换算。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `commands/` 使用
//! - 使用 `parsers/{atom_site,lattice,symop}.rs`, `symmetry/expand.rs`

use super::atom_site::{ColumnMap, ColumnMapper};
use super::lattice::{is_lattice_line, parse_lattice_value};
use super::symop::parse_symmetry_line;
use crate::error::{CifError, Result};
use crate::models::{CifStructure, LatticeParameters, RawAtomSite};
use crate::symmetry::{expand_positions, SymmetryOperator, Tolerance};

use std::fs;
use std::path::Path;

/// 对称操作循环的列名（新旧两种写法）
pub const SYMOP_TAGS: [&str; 2] = [
    "_space_group_symop_operation_xyz",
    "_symmetry_equiv_pos_as_xyz",
];

pub const ATOM_SITE_TAG: &str = "_atom_site_label";

pub const LOOP_TAG: &str = "loop_";

/// 当前所在的数据块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    None,
    Symmetry,
    AtomSite,
}

/// 单次扫描的解析状态
#[derive(Debug)]
pub struct CifScanner {
    state: BlockState,
    /// 最近一个 `loop_` 之后已声明的列数；遇到数据行或空行后失效
    pending_loop_headers: Option<usize>,
    /// atom_site 循环内的列序号
    header_index: usize,
    mapper: ColumnMapper,
    columns: Option<ColumnMap>,
    lattice: LatticeParameters,
    sites: Vec<RawAtomSite>,
    operators: Vec<SymmetryOperator>,
}

impl Default for CifScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl CifScanner {
    pub fn new() -> Self {
        CifScanner {
            state: BlockState::None,
            pending_loop_headers: None,
            header_index: 0,
            mapper: ColumnMapper::default(),
            columns: None,
            lattice: LatticeParameters::default(),
            sites: Vec::new(),
            operators: Vec::new(),
        }
    }

    /// 处理一行，`line_no` 从 1 开始
    pub fn scan_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line.trim_start().starts_with('#') {
            return Ok(());
        }

        // 对称操作列声明本身不是数据
        if SYMOP_TAGS.iter().any(|tag| line.starts_with(tag)) {
            self.state = BlockState::Symmetry;
            self.pending_loop_headers = None;
            return Ok(());
        }

        if line.starts_with(ATOM_SITE_TAG) {
            self.state = BlockState::AtomSite;
            self.header_index = self.pending_loop_headers.take().unwrap_or(0);
            self.mapper = ColumnMapper::default();
            self.columns = None;
        }

        if line.starts_with(LOOP_TAG) {
            self.state = BlockState::None;
            self.pending_loop_headers = Some(0);
        } else if line.trim().is_empty() {
            self.state = BlockState::None;
            self.pending_loop_headers = None;
        }

        match self.state {
            BlockState::AtomSite => self.scan_atom_site_line(line, line_no)?,
            BlockState::Symmetry => {
                if !line.trim_start().starts_with('_') {
                    self.operators.push(parse_symmetry_line(line, line_no)?);
                }
            }
            BlockState::None => self.track_loop_header(line),
        }

        if self.state != BlockState::Symmetry && is_lattice_line(line) {
            self.lattice.push(parse_lattice_value(line, line_no)?);
        }

        Ok(())
    }

    fn scan_atom_site_line(&mut self, line: &str, line_no: usize) -> Result<()> {
        if line.contains('_') {
            self.mapper.declare(line, self.header_index);
            self.header_index += 1;
            return Ok(());
        }

        let columns = match self.columns {
            Some(columns) => columns,
            None => {
                let columns = self.mapper.resolve()?;
                self.columns = Some(columns);
                columns
            }
        };

        self.sites.push(columns.parse_row(line, line_no)?);
        Ok(())
    }

    /// 记录 `_atom_site_label` 之前同一循环中已声明的列
    fn track_loop_header(&mut self, line: &str) {
        if line.starts_with(LOOP_TAG) {
            return;
        }
        if let Some(count) = self.pending_loop_headers {
            self.pending_loop_headers = if line.trim_start().starts_with('_') {
                Some(count + 1)
            } else {
                None
            };
        }
    }

    /// 结束扫描并展开原子位置
    pub fn finish(self, name: &str, tolerance: Tolerance) -> Result<CifStructure> {
        let unique_positions = expand_positions(&self.sites, &self.operators, tolerance)?;

        Ok(CifStructure {
            name: name.to_string(),
            lattice_parameters: self.lattice,
            sites: self.sites,
            operators: self.operators,
            unique_positions,
        })
    }
}

/// 解析 CIF 文件
pub fn parse_cif_file(path: &Path, tolerance: Tolerance) -> Result<CifStructure> {
    let content = fs::read_to_string(path).map_err(|e| CifError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_cif_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
        tolerance,
    )
}

/// 从字符串内容解析 CIF
pub fn parse_cif_content(content: &str, name: &str, tolerance: Tolerance) -> Result<CifStructure> {
    let mut scanner = CifScanner::new();
    for (idx, line) in content.lines().enumerate() {
        scanner.scan_line(line, idx + 1)?;
    }
    scanner.finish(name, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<CifStructure> {
        parse_cif_content(content, "test", Tolerance::default())
    }

    const SI_P1: &str = r#"data_Si
_cell_length_a    5.43
_cell_length_b    5.43
_cell_length_c    5.43
_cell_angle_alpha 90
_cell_angle_beta  90
_cell_angle_gamma 90

loop_
_symmetry_equiv_pos_as_xyz
x,y,z

loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 0.0 0.0 0.0
"#;

    #[test]
    fn test_minimal_si() {
        let s = parse(SI_P1).unwrap();
        assert_eq!(
            s.lattice_parameters.values(),
            &[5.43, 5.43, 5.43, 90.0, 90.0, 90.0]
        );
        assert_eq!(s.operators.len(), 1);
        assert_eq!(s.unique_positions.get("Si").unwrap(), &[[0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_inversion_centre() {
        let content = r#"
loop_
_space_group_symop_operation_xyz
'x, y, z'
'-x, -y, -z'

loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
C1 0.25 0.25 0.25
"#;
        let s = parse(content).unwrap();
        let c = s.unique_positions.get("C").unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c[0], [0.25, 0.25, 0.25]);
        assert_eq!(c[1], [0.75, 0.75, 0.75]);
    }

    #[test]
    fn test_lattice_file_order() {
        let content = "_cell_angle_gamma 120\n_cell_length_a 3.0(1)\n_cell_length_c 5.0\n";
        let s = parse(content).unwrap();
        assert_eq!(s.lattice_parameters.values(), &[120.0, 3.0, 5.0]);
        assert!(s.lattice().is_none());
    }

    #[test]
    fn test_rutile_expansion() {
        let content = r#"data_TiO2
_symmetry_space_group_name_H-M 'P 42/m n m'
_cell_length_a 4.5937
_cell_length_b 4.5937
_cell_length_c 2.9587
_cell_angle_alpha 90
_cell_angle_beta 90
_cell_angle_gamma 90
loop_
_space_group_symop_id
_space_group_symop_operation_xyz
1 x,y,z
2 -x,-y,z
3 -y+1/2,x+1/2,z+1/2
4 y+1/2,-x+1/2,z+1/2
5 -x+1/2,y+1/2,-z+1/2
6 x+1/2,-y+1/2,-z+1/2
7 y,x,-z
8 -y,-x,-z
9 -x,-y,-z
10 x,y,-z
11 y+1/2,-x+1/2,-z+1/2
12 -y+1/2,x+1/2,-z+1/2
13 x+1/2,-y+1/2,z+1/2
14 -x+1/2,y+1/2,z+1/2
15 -y,-x,z
16 y,x,z
loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
_atom_site_occupancy
Ti1 Ti 0.0 0.0 0.0 1.0
O1 O 0.3053(2) 0.3053(2) 0.0 1.0
"#;
        let s = parse(content).unwrap();
        assert_eq!(s.lattice_parameters.len(), 6);
        assert_eq!(s.operators.len(), 16);
        assert_eq!(s.sites.len(), 2);
        assert_eq!(s.unique_positions.get("Ti").unwrap().len(), 2);
        assert_eq!(s.unique_positions.get("O").unwrap().len(), 4);
        assert_eq!(s.unique_positions.formula(), "O4Ti2");

        for (_, positions) in s.unique_positions.iter() {
            for p in positions {
                assert!(p.iter().all(|v| (0.0..1.0).contains(v)));
            }
        }
    }

    #[test]
    fn test_headers_before_label() {
        let content = r#"
loop_
_atom_site_type_symbol
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Na Na1 0.1 0.2 0.3
"#;
        let mut scanner = CifScanner::new();
        for (i, line) in content.lines().enumerate() {
            scanner.scan_line(line, i + 1).unwrap();
        }
        assert_eq!(scanner.state, BlockState::AtomSite);

        let s = scanner.finish("test", Tolerance::default()).unwrap();
        assert_eq!(s.sites[0].label, "Na1");
        assert_eq!(s.sites[0].position, [0.1, 0.2, 0.3]);
        // 没有对称操作时不生成任何位置
        assert!(s.unique_positions.get("Na").unwrap().is_empty());
    }

    #[test]
    fn test_symop_with_trailing_id_column() {
        let content = r#"
loop_
_space_group_symop_operation_xyz
_space_group_symop_id
'x, y, z' 1
'x+1/2, y+1/2, z' 2
# body-centred
loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Cs1 0 0 0
"#;
        let s = parse(content).unwrap();
        assert_eq!(s.operators.len(), 2);
        assert_eq!(s.operators[1].as_xyz(), "x+1/2,y+1/2,z");
        assert_eq!(s.unique_positions.get("Cs").unwrap().len(), 2);
    }

    #[test]
    fn test_lattice_tag_inside_symmetry_block_ignored() {
        let content = "_symmetry_equiv_pos_as_xyz\nx,y,z\n_cell_length_a 5.0\n\n_cell_length_b 6.0\n";
        let s = parse(content).unwrap();
        assert_eq!(s.lattice_parameters.values(), &[6.0]);
    }

    #[test]
    fn test_malformed_label_aborts() {
        let content = r#"
_symmetry_equiv_pos_as_xyz
x,y,z

loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
123 0.1 0.2 0.3
"#;
        assert!(matches!(
            parse(content),
            Err(CifError::MalformedElementLabel { line: 10, .. })
        ));
    }

    #[test]
    fn test_malformed_symmetry_line_aborts() {
        let content = "loop_\n_space_group_symop_operation_xyz\n'x, y'\n";
        assert!(matches!(
            parse(content),
            Err(CifError::MalformedSymmetryLine { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_fract_column_aborts() {
        let content = "loop_\n_atom_site_label\n_atom_site_fract_x\n_atom_site_fract_y\nSi1 0 0\n";
        assert!(matches!(
            parse(content),
            Err(CifError::MissingAtomSiteColumn { .. })
        ));
    }

    #[test]
    fn test_non_finite_coordinate_aborts() {
        let content = r#"
_symmetry_equiv_pos_as_xyz
x,y,z
-x,-y,-z

loop_
_atom_site_label
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
Si1 nan inf 0.0
"#;
        match parse(content) {
            Err(CifError::InvalidNumber { line, token }) => {
                assert_eq!(line, 11);
                assert_eq!(token, "nan");
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.unique_positions)),
        }
    }

    #[test]
    fn test_non_finite_lattice_value_aborts() {
        assert!(matches!(
            parse("_cell_length_a 5.0\n_cell_length_b inf\n"),
            Err(CifError::InvalidNumber { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_cif_file() {
        let path = std::env::temp_dir().join(format!("cifexpand_si_{}.cif", std::process::id()));
        fs::write(&path, SI_P1).unwrap();

        let s = parse_cif_file(&path, Tolerance::default()).unwrap();
        let _ = fs::remove_file(&path);

        assert!(s.name.starts_with("cifexpand_si_"));
        assert_eq!(s.unique_positions.total_count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = parse_cif_file(Path::new("/nonexistent/cifexpand.cif"), Tolerance::default());
        assert!(matches!(result, Err(CifError::FileReadError { .. })));
    }
}
