//! # cifexpand - CIF 对称展开工具
//!
//! 读取 CIF 晶体结构文件，用对称操作将不对称单元展开为完整晶胞内的原子位置。
//!
//! ## 子命令
//! - `inspect` - 解析单个 CIF，打印晶胞参数、对称操作与展开结果
//! - `expand`  - 展开并导出 (CSV / JSON / XYZ)，支持目录批量并行处理
//! - `check`   - 调用外部程序校验对称操作是否对应指定空间群
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (CIF 行扫描与字段解析)
//!   │     ├── symmetry/  (表达式求值、位置展开、空间群校验)
//!   │     ├── models/    (数据模型)
//!   │     ├── export.rs  (结果导出)
//!   │     └── batch/     (批量处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod export;
mod models;
mod parsers;
mod symmetry;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::output::set_verbose(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
