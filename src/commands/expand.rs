//! # expand 命令实现
//!
//! 展开 CIF 原子位置并导出为数据文件。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 批量模式并行处理（rayon）
//! - 导出 CSV / JSON / XYZ
//!
//! ## 依赖关系
//! - 使用 `cli/expand.rs` 定义的 ExpandArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `parsers/` 读取结构，`export.rs` 写出结果

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::expand::{ExpandArgs, ExportFormat};
use crate::error::{CifError, Result};
use crate::export;
use crate::parsers;
use crate::symmetry::Tolerance;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 expand 命令
pub fn execute(args: ExpandArgs) -> Result<()> {
    output::print_header(&format!("Expanding CIF to {} format", args.format));

    let config = ExpandConfig {
        format: args.format,
        tolerance: args.tolerance.to_tolerance(),
        overwrite: args.overwrite,
    };

    if args.input.is_file() {
        execute_single_file(&args.input, &args.output, &config)
    } else if args.input.is_dir() {
        execute_batch(&args, &config)
    } else {
        Err(CifError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 共享的处理配置
struct ExpandConfig {
    format: ExportFormat,
    tolerance: Tolerance,
    overwrite: bool,
}

/// 单文件模式，解析错误原样返回
fn execute_single_file(input: &Path, output_file: &Path, config: &ExpandConfig) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", input.display()));

    if let Some(msg) = existing_output(output_file, config) {
        output::print_skip(&msg);
        return Ok(());
    }

    let count = expand_and_export(input, output_file, config)?;
    output::print_success(&success_message(input, output_file, count));
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &ExpandArgs, config: &ExpandConfig) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} CIF files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| CifError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| {
        let output_file = batch_output_path(file, &args.output, config.format);
        process_file(file, &output_file, config)
    })?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed (of {}), {} atoms written",
        result.success,
        result.skipped,
        result.failed,
        result.total(),
        result.atoms
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 批量模式的输出文件名：`<stem>_expanded.<ext>`
fn batch_output_path(input: &Path, output_dir: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("structure");
    output_dir.join(format!("{}_expanded.{}", stem, format.extension()))
}

/// 输出已存在且未指定 --overwrite 时返回跳过信息
fn existing_output(output_file: &Path, config: &ExpandConfig) -> Option<String> {
    if output_file.exists() && !config.overwrite {
        Some(format!("Output exists, skipping: {}", output_file.display()))
    } else {
        None
    }
}

fn success_message(input: &Path, output_file: &Path, count: usize) -> String {
    format!(
        "{} -> {} ({} atoms)",
        input.display(),
        output_file.display(),
        count
    )
}

/// 批量模式下处理单个 CIF 文件
fn process_file(input: &Path, output_file: &Path, config: &ExpandConfig) -> ProcessResult {
    if let Some(msg) = existing_output(output_file, config) {
        return ProcessResult::Skipped(msg);
    }

    match expand_and_export(input, output_file, config) {
        Ok(count) => ProcessResult::Success(success_message(input, output_file, count), count),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn expand_and_export(input: &Path, output_file: &Path, config: &ExpandConfig) -> Result<usize> {
    let structure = parsers::parse_cif_file(input, config.tolerance)?;

    super::report_parse_stats(&structure);
    super::warn_if_unexpanded(&structure);

    match config.format {
        ExportFormat::Csv => export::to_csv(&structure, output_file)?,
        ExportFormat::Json => export::to_json(&structure, output_file)?,
        ExportFormat::Xyz => export::to_xyz(&structure, output_file)?,
    }

    Ok(structure.unique_positions.total_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_output_path() {
        let path = batch_output_path(
            Path::new("/data/cifs/quartz.cif"),
            Path::new("/tmp/out"),
            ExportFormat::Json,
        );
        assert_eq!(path, PathBuf::from("/tmp/out/quartz_expanded.json"));
    }

    #[test]
    fn test_process_file_skips_existing() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("cifexpand_skip_{}.cif", std::process::id()));
        let output = dir.join(format!("cifexpand_skip_{}.csv", std::process::id()));
        fs::write(&input, "_symmetry_equiv_pos_as_xyz\nx,y,z\n").unwrap();
        fs::write(&output, "existing").unwrap();

        let config = ExpandConfig {
            format: ExportFormat::Csv,
            tolerance: Tolerance::default(),
            overwrite: false,
        };
        let skipped = process_file(&input, &output, &config);

        let config = ExpandConfig {
            overwrite: true,
            ..config
        };
        let written = process_file(&input, &output, &config);
        let content = fs::read_to_string(&output).unwrap();

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);

        assert!(matches!(skipped, ProcessResult::Skipped(_)));
        assert!(matches!(written, ProcessResult::Success(_, 0)));
        assert_eq!(content.trim(), "element,x,y,z");
    }

    #[test]
    fn test_single_file_keeps_typed_error() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("cifexpand_typed_{}.cif", std::process::id()));
        let output = dir.join(format!("cifexpand_typed_{}.csv", std::process::id()));
        fs::write(&input, "loop_\n_symmetry_equiv_pos_as_xyz\nx,y\n").unwrap();

        let config = ExpandConfig {
            format: ExportFormat::Csv,
            tolerance: Tolerance::default(),
            overwrite: true,
        };
        let result = execute_single_file(&input, &output, &config);
        let _ = fs::remove_file(&input);

        assert!(matches!(
            result,
            Err(CifError::MalformedSymmetryLine { line: 3, .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_process_file_reports_parse_failure() {
        let dir = std::env::temp_dir();
        let input = dir.join(format!("cifexpand_bad_{}.cif", std::process::id()));
        let output = dir.join(format!("cifexpand_bad_{}.csv", std::process::id()));
        fs::write(&input, "_symmetry_equiv_pos_as_xyz\nx,y\n").unwrap();

        let config = ExpandConfig {
            format: ExportFormat::Csv,
            tolerance: Tolerance::default(),
            overwrite: true,
        };
        let result = process_file(&input, &output, &config);
        let _ = fs::remove_file(&input);

        match result {
            ProcessResult::Failed(_, err) => assert!(err.contains("symmetry operator")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!output.exists());
    }
}
