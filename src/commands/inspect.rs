//! # inspect 命令实现
//!
//! 解析单个 CIF 文件，打印晶胞参数、对称操作与展开后的原子位置。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/cif.rs`
//! - 使用 `utils/output.rs`

use crate::cli::inspect::InspectArgs;
use crate::error::{CifError, Result};
use crate::models::CifStructure;
use crate::parsers;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 对称操作表格行
#[derive(Tabled)]
struct OperatorRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "x'")]
    x: String,
    #[tabled(rename = "y'")]
    y: String,
    #[tabled(rename = "z'")]
    z: String,
}

/// 原子位置表格行
#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "x")]
    x: String,
    #[tabled(rename = "y")]
    y: String,
    #[tabled(rename = "z")]
    z: String,
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    output::print_header("CIF Symmetry Expansion");

    if !args.input.is_file() {
        return Err(CifError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let structure = parsers::parse_cif_file(&args.input, args.tolerance.to_tolerance())?;
    output::print_success(&format!("Parsed '{}'", args.input.display()));

    super::report_parse_stats(&structure);
    super::warn_if_unexpanded(&structure);

    print_lattice(&structure);

    if args.operators {
        print_operator_table(&structure);
    }

    print_position_table(&structure, args.cartesian)?;

    output::print_separator();
    output::print_done(&format!(
        "{} atoms in unit cell ({})",
        structure.unique_positions.total_count(),
        structure.unique_positions.formula()
    ));

    Ok(())
}

fn print_lattice(structure: &CifStructure) {
    let params = structure.lattice_parameters.values();
    let formatted: Vec<String> = params.iter().map(|v| format!("{:.4}", v)).collect();
    output::print_info("Cell");
    output::print_field("Lattice parameters", &format!("[{}]", formatted.join(", ")));
    output::print_field("Symmetry operators", &structure.operators.len().to_string());
    output::print_field("Asymmetric sites", &structure.sites.len().to_string());

    match structure.lattice() {
        Some(lattice) => {
            output::print_field("Cell volume", &format!("{:.4} Å³", lattice.volume()));
        }
        None if structure.lattice_parameters.is_empty() => {
            output::print_warning("No _cell_length_* / _cell_angle_* entries found")
        }
        None => output::print_warning(&format!(
            "Expected 6 lattice parameters, found {}",
            params.len()
        )),
    }
}

fn print_operator_table(structure: &CifStructure) {
    let rows: Vec<OperatorRow> = structure
        .operators
        .iter()
        .enumerate()
        .map(|(i, op)| OperatorRow {
            index: i + 1,
            x: op.components[0].clone(),
            y: op.components[1].clone(),
            z: op.components[2].clone(),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("{} Symmetry Operators", rows.len()));
        println!("{}", Table::new(&rows));
    }
}

fn print_position_table(structure: &CifStructure, cartesian: bool) -> Result<()> {
    let lattice = if cartesian {
        Some(structure.lattice().ok_or_else(|| {
            CifError::InvalidArgument(
                "Cartesian output needs all six lattice parameters".to_string(),
            )
        })?)
    } else {
        None
    };

    let mut rows = Vec::new();
    for (element, positions) in structure.unique_positions.iter() {
        for (i, p) in positions.iter().enumerate() {
            let v = match &lattice {
                Some(lattice) => lattice.frac_to_cart(*p),
                None => *p,
            };
            rows.push(PositionRow {
                element: element.to_string(),
                index: i + 1,
                x: format!("{:.6}", v[0]),
                y: format!("{:.6}", v[1]),
                z: format!("{:.6}", v[2]),
            });
        }
    }

    if !rows.is_empty() {
        let unit = if cartesian { "Cartesian, Å" } else { "fractional" };
        output::print_header(&format!("Unique Positions ({})", unit));
        println!("{}", Table::new(&rows));
    }

    Ok(())
}
