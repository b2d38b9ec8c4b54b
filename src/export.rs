//! # 展开结果导出
//!
//! 将展开后的原子位置导出为数据文件。
//!
//! ## 支持格式
//! - CSV: element, x, y, z（分数坐标）
//! - JSON: 晶胞参数、对称操作、原始位置与展开位置
//! - XYZ: 笛卡尔坐标 (Å)，需要完整的六个晶胞参数
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 调用
//! - 使用 `models/structure.rs`
//! - 使用 `csv`, `serde_json` 库

use crate::error::{CifError, Result};
use crate::models::CifStructure;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// 导出为 CSV 格式
pub fn to_csv(structure: &CifStructure, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["element", "x", "y", "z"])?;

    for (element, positions) in structure.unique_positions.iter() {
        for p in positions {
            wtr.write_record([
                element.to_string(),
                format!("{:.8}", p[0]),
                format!("{:.8}", p[1]),
                format!("{:.8}", p[2]),
            ])?;
        }
    }

    wtr.flush().map_err(|e| CifError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 JSON 格式
pub fn to_json(structure: &CifStructure, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(|e| CifError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, structure)?;
    writer.flush().map_err(|e| CifError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 生成 XYZ 格式字符串
pub fn to_xyz_string(structure: &CifStructure) -> Result<String> {
    let lattice = structure.lattice().ok_or_else(|| {
        CifError::InvalidArgument(format!(
            "XYZ output needs all six lattice parameters, '{}' has {}",
            structure.name,
            structure.lattice_parameters.len()
        ))
    })?;

    let mut result = String::new();
    result.push_str(&format!("{}\n", structure.unique_positions.total_count()));
    result.push_str(&format!(
        "{} {}\n",
        structure.name,
        structure.unique_positions.formula()
    ));

    for (element, positions) in structure.unique_positions.iter() {
        for p in positions {
            let cart = lattice.frac_to_cart(*p);
            result.push_str(&format!(
                "{} {:16.10} {:16.10} {:16.10}\n",
                element, cart[0], cart[1], cart[2]
            ));
        }
    }

    Ok(result)
}

/// 导出为 XYZ 格式
pub fn to_xyz(structure: &CifStructure, output_path: &Path) -> Result<()> {
    let content = to_xyz_string(structure)?;
    fs::write(output_path, content).map_err(|e| CifError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}
