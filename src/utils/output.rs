//! # 终端输出工具
//!
//! 统一的彩色终端输出，以及 `--verbose` 下的诊断输出。
//! 状态消息写到 stdout，警告、错误与诊断写到 stderr，便于重定向结果表格。
//!
//! ## 依赖关系
//! - 被 `commands/`、`main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// 开启/关闭诊断输出
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// 诊断消息，仅在 `--verbose` 时输出
pub fn print_debug(msg: &str) {
    if is_verbose() {
        eprintln!("{} {}", "[DBG]".magenta(), msg.dimmed());
    }
}

pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 键值对输出，如晶胞参数
pub fn print_field(key: &str, value: &str) {
    println!("    {:<22} {}", key.cyan(), value);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(60);
    println!("\n{}\n  {}\n{}\n", rule.dimmed(), title.bold(), rule.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
