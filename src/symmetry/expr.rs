//! # 坐标表达式求值器
//!
//! 将对称操作的单个分量（如 `-x+1/2`、`x-y`、`z`）解析为小型算术语法树，
//! 并对给定的分数坐标直接求值。
//!
//! ## 支持的语法
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | '+' unary | primary
//! primary := NUMBER | 'x' | 'y' | 'z' | '(' expr ')'
//! ```
//!
//! 语法之外的任何字符或记号都会返回 `MalformedExpression`。
//!
//! ## 依赖关系
//! - 被 `symmetry/operator.rs` 使用
//! - 使用 `error.rs`

use crate::error::{CifError, Result};

/// 坐标轴变量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// 二元运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// 表达式语法树
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    Var(Axis),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Group(Box<Expr>),
}

impl Expr {
    /// 解析坐标表达式字符串
    pub fn parse(source: &str) -> Result<Expr> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            source,
            tokens,
            pos: 0,
        };
        let expr = parser.parse_expr()?;
        if let Some(tok) = parser.peek() {
            return Err(malformed(
                source,
                format!("unexpected trailing token {}", tok.describe()),
            ));
        }
        Ok(expr)
    }

    /// 对给定的 (x, y, z) 求值
    pub fn eval(&self, xyz: [f64; 3]) -> Result<f64> {
        match self {
            Expr::Literal(v) => Ok(*v),
            Expr::Var(axis) => Ok(xyz[axis.index()]),
            Expr::Neg(inner) => Ok(-inner.eval(xyz)?),
            Expr::Group(inner) => inner.eval(xyz),
            Expr::Binary(op, lhs, rhs) => {
                let l = lhs.eval(xyz)?;
                let r = rhs.eval(xyz)?;
                match op {
                    BinaryOp::Add => Ok(l + r),
                    BinaryOp::Sub => Ok(l - r),
                    BinaryOp::Mul => Ok(l * r),
                    BinaryOp::Div => {
                        if r == 0.0 {
                            Err(CifError::MalformedExpression {
                                expr: self.to_string(),
                                reason: "division by zero".to_string(),
                            })
                        } else {
                            Ok(l / r)
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(v) => write!(f, "{}", v),
            Expr::Var(Axis::X) => write!(f, "x"),
            Expr::Var(Axis::Y) => write!(f, "y"),
            Expr::Var(Axis::Z) => write!(f, "z"),
            Expr::Neg(inner) => write!(f, "-{}", inner),
            Expr::Group(inner) => write!(f, "({})", inner),
            Expr::Binary(op, lhs, rhs) => {
                let sym = match op {
                    BinaryOp::Add => "+",
                    BinaryOp::Sub => "-",
                    BinaryOp::Mul => "*",
                    BinaryOp::Div => "/",
                };
                write!(f, "{}{}{}", lhs, sym, rhs)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 词法分析
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Var(Axis),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {}", v),
            Token::Var(Axis::X) => "'x'".to_string(),
            Token::Var(Axis::Y) => "'y'".to_string(),
            Token::Var(Axis::Z) => "'z'".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

fn malformed(source: &str, reason: impl Into<String>) -> CifError {
    CifError::MalformedExpression {
        expr: source.to_string(),
        reason: reason.into(),
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => {
                i += 1;
                continue;
            }
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            'x' | 'X' => tokens.push(Token::Var(Axis::X)),
            'y' | 'Y' => tokens.push(Token::Var(Axis::Y)),
            'z' | 'Z' => tokens.push(Token::Var(Axis::Z)),
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| malformed(source, format!("invalid number '{}'", literal)))?;
                tokens.push(Token::Number(value));
                continue;
            }
            other => {
                return Err(malformed(source, format!("unsupported character '{}'", other)));
            }
        }
        i += 1;
    }

    if tokens.is_empty() {
        return Err(malformed(source, "empty expression"));
    }

    Ok(tokens)
}

// ─────────────────────────────────────────────────────────────
// 递归下降语法分析
// ─────────────────────────────────────────────────────────────

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    /// term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let inner = self.parse_unary()?;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Number(v)) => Ok(Expr::Literal(v)),
            Some(Token::Var(axis)) => Ok(Expr::Var(axis)),
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(Expr::Group(Box::new(inner))),
                    _ => Err(malformed(self.source, "missing closing ')'")),
                }
            }
            Some(tok) => Err(malformed(
                self.source,
                format!("unexpected token {}", tok.describe()),
            )),
            None => Err(malformed(self.source, "unexpected end of expression")),
        }
    }
}
