//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的 CIF 文件。
//!
//! ## 功能
//! - 单文件输入直接返回
//! - 逗号分隔的多个 glob 模式（如 "*.cif,*.CIF"）
//! - 可选递归搜索
//!
//! ## 依赖关系
//! - 被 `commands/expand.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{CifError, Result};

use glob::Pattern;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<String>,
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*.cif".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        let patterns: Vec<String> = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件，结果按路径排序
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(CifError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    CifError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| patterns.iter().any(|p| p.matches(name)))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_with_patterns() {
        let root = std::env::temp_dir().join(format!("cifexpand_collect_{}", std::process::id()));
        let nested = root.join("nested");
        fs::create_dir_all(&nested).unwrap();
        for name in ["a.cif", "b.CIF", "notes.txt"] {
            fs::write(root.join(name), "").unwrap();
        }
        fs::write(nested.join("c.cif"), "").unwrap();

        let flat = FileCollector::new(root.clone()).collect().unwrap();
        let multi = FileCollector::new(root.clone())
            .with_pattern("*.cif, *.CIF")
            .collect()
            .unwrap();
        let deep = FileCollector::new(root.clone())
            .recursive(true)
            .collect()
            .unwrap();

        let _ = fs::remove_dir_all(&root);

        assert_eq!(flat, vec![root.join("a.cif")]);
        assert_eq!(multi.len(), 2);
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        let missing = FileCollector::new(PathBuf::from("/nonexistent/cifexpand_dir"));
        assert!(matches!(
            missing.collect(),
            Err(CifError::DirectoryNotFound { .. })
        ));

        let bad_pattern = FileCollector::new(std::env::temp_dir()).with_pattern("[");
        assert!(matches!(
            bad_pattern.collect(),
            Err(CifError::InvalidArgument(_))
        ));
    }
}
