//! # 空间群校验接口
//!
//! 判断解析得到的对称操作集合是否等价于某个编号的空间群。
//! 本程序不内置空间群数据库，校验交给外部程序完成。
//!
//! ## 外部程序协议
//! ```text
//! <command> <space_group_number>
//! stdin:  每行一个对称操作，如 "-x+1/2,y,-z"
//! stdout: true / false（也接受 yes/no/1/0）
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/check.rs` 使用
//! - 使用 `symmetry/operator.rs`

use super::operator::SymmetryOperator;
use crate::error::{CifError, Result};

use std::io::Write;
use std::process::{Command, Stdio};

/// 空间群校验服务
pub trait SpaceGroupOracle {
    fn is_equivalent(&self, operators: &[SymmetryOperator], space_group: u32) -> Result<bool>;
}

/// 检查空间群编号范围 (1-230)
pub fn validate_space_group(space_group: u32) -> Result<u32> {
    if (1..=230).contains(&space_group) {
        Ok(space_group)
    } else {
        Err(CifError::InvalidArgument(format!(
            "Space group number must be within 1-230, got {}",
            space_group
        )))
    }
}

/// 调用外部命令的校验实现
pub struct ExternalCommandOracle {
    command: String,
}

impl ExternalCommandOracle {
    pub fn new(command: impl Into<String>) -> Self {
        ExternalCommandOracle {
            command: command.into(),
        }
    }

    /// 解析外部程序的回答
    fn parse_reply(&self, stdout: &str) -> Result<bool> {
        match stdout.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            other => Err(CifError::InvalidOracleReply {
                command: self.command.clone(),
                reply: other.to_string(),
            }),
        }
    }
}

impl SpaceGroupOracle for ExternalCommandOracle {
    fn is_equivalent(&self, operators: &[SymmetryOperator], space_group: u32) -> Result<bool> {
        let space_group = validate_space_group(space_group)?;

        let mut child = Command::new(&self.command)
            .arg(space_group.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| CifError::CommandNotFound {
                command: self.command.clone(),
            })?;

        let input: String = operators
            .iter()
            .map(|op| format!("{}\n", op.as_xyz()))
            .collect();

        if let Some(ref mut stdin) = child.stdin {
            stdin
                .write_all(input.as_bytes())
                .map_err(|e| CifError::CommandFailed {
                    command: self.command.clone(),
                    stderr: e.to_string(),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CifError::CommandFailed {
                command: self.command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CifError::CommandFailed {
                command: format!("{} {}", self.command, space_group),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        self.parse_reply(&String::from_utf8_lossy(&output.stdout))
    }
}
