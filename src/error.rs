//! # 统一错误处理模块
//!
//! 定义 cifexpand 的所有错误类型，使用 `thiserror` 派生。
//! CIF 解析中的任何错误都是致命的：整个文件解析中止，不返回部分结果。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// cifexpand 统一错误类型
#[derive(Error, Debug)]
pub enum CifError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // CIF 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Line {line}: symmetry operator cannot be parsed: '{content}'")]
    MalformedSymmetryLine { line: usize, content: String },

    #[error("Line {line}: element is not formatted properly in label '{label}'")]
    MalformedElementLabel { line: usize, label: String },

    #[error("Invalid coordinate expression '{expr}': {reason}")]
    MalformedExpression { expr: String, reason: String },

    #[error("Atom site loop does not declare the '{field}' column")]
    MissingAtomSiteColumn { field: String },

    #[error("Line {line}: malformed atom site row: {reason}")]
    MalformedAtomSiteRow { line: usize, reason: String },

    #[error("Line {line}: cannot convert '{token}' to a number")]
    InvalidNumber { line: usize, token: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Unexpected reply from space group oracle '{command}': '{reply}'")]
    InvalidOracleReply { command: String, reply: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CifError>;
