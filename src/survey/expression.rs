//! Expression language for visibility predicates, validators and triggers
//!
//! Supports the subset the questionnaire needs:
//! - operands: `{name}`, `{name.length}`, `'text'`, `"text"`, numbers, `true`, `false`
//! - comparisons: `=`, `==`, `<>`, `!=`, `<`, `<=`, `>`, `>=`
//! - postfix checks: `empty`, `notempty`
//! - logic: `and`, `or`, `not` / `!`, parentheses

use super::answers::{AnswerSet, AnswerValue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while tokenizing or parsing an expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("unterminated string literal at offset {0}")]
    UnterminatedString(usize),
    #[error("unterminated variable reference at offset {0}")]
    UnterminatedVariable(usize),
    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected token '{found}'")]
    UnexpectedToken { found: String },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("empty expression")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Variable(String),
    Text(String),
    Number(f64),
    Ident(String),
    Op(CompareOp),
    Bang,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Variable(name) => write!(f, "{{{name}}}"),
            Token::Text(s) => write!(f, "'{s}'"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::Bang => write!(f, "!"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
        }
    }
}

/// Literal operand
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable { name: String, length: bool },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    IsEmpty {
        operand: Box<Expr>,
        negated: bool,
    },
}

fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '{' => {
                let start = i + 1;
                let end = chars[start..]
                    .iter()
                    .position(|(_, ch)| *ch == '}')
                    .map(|offset| start + offset)
                    .ok_or(ExpressionError::UnterminatedVariable(pos))?;
                let name: String = chars[start..end].iter().map(|(_, ch)| ch).collect();
                tokens.push(Token::Variable(name.trim().to_string()));
                i = end + 1;
            }
            '\'' | '"' => {
                let quote = c;
                let start = i + 1;
                let end = chars[start..]
                    .iter()
                    .position(|(_, ch)| *ch == quote)
                    .map(|offset| start + offset)
                    .ok_or(ExpressionError::UnterminatedString(pos))?;
                tokens.push(Token::Text(
                    chars[start..end].iter().map(|(_, ch)| ch).collect(),
                ));
                i = end + 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '=' => {
                // `=` and `==` are the same operator
                i += if chars.get(i + 1).is_some_and(|(_, ch)| *ch == '=') {
                    2
                } else {
                    1
                };
                tokens.push(Token::Op(CompareOp::Eq));
            }
            '!' => {
                if chars.get(i + 1).is_some_and(|(_, ch)| *ch == '=') {
                    tokens.push(Token::Op(CompareOp::NotEq));
                    i += 2;
                } else {
                    tokens.push(Token::Bang);
                    i += 1;
                }
            }
            '<' => match chars.get(i + 1).map(|(_, ch)| *ch) {
                Some('>') => {
                    tokens.push(Token::Op(CompareOp::NotEq));
                    i += 2;
                }
                Some('=') => {
                    tokens.push(Token::Op(CompareOp::LessEq));
                    i += 2;
                }
                _ => {
                    tokens.push(Token::Op(CompareOp::Less));
                    i += 1;
                }
            },
            '>' => {
                if chars.get(i + 1).is_some_and(|(_, ch)| *ch == '=') {
                    tokens.push(Token::Op(CompareOp::GreaterEq));
                    i += 2;
                } else {
                    tokens.push(Token::Op(CompareOp::Greater));
                    i += 1;
                }
            }
            c if c.is_ascii_digit() || c == '-' || c == '.' => {
                let start = i;
                i += 1;
                while chars
                    .get(i)
                    .is_some_and(|(_, ch)| ch.is_ascii_digit() || *ch == '.')
                {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|(_, ch)| ch).collect();
                let number = text
                    .parse::<f64>()
                    .map_err(|_| ExpressionError::UnexpectedChar { ch: c, pos })?;
                tokens.push(Token::Number(number));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while chars
                    .get(i)
                    .is_some_and(|(_, ch)| ch.is_alphanumeric() || *ch == '_')
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().map(|(_, ch)| ch).collect();
                tokens.push(Token::Ident(word.to_lowercase()));
            }
            other => return Err(ExpressionError::UnexpectedChar { ch: other, pos }),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn peek_ident(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(w)) if w == word)
    }

    fn parse_or(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.parse_and()?;
        while self.peek_ident("or") {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.parse_unary()?;
        while self.peek_ident("and") {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExpressionError> {
        if matches!(self.peek(), Some(Token::Bang)) || self.peek_ident("not") {
            self.advance();
            return Ok(Expr::Not(Box::new(self.parse_unary()?)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExpressionError> {
        let lhs = self.parse_operand()?;

        if self.peek_ident("empty") || self.peek_ident("notempty") {
            let negated = self.peek_ident("notempty");
            self.advance();
            return Ok(Expr::IsEmpty {
                operand: Box::new(lhs),
                negated,
            });
        }

        if let Some(Token::Op(op)) = self.peek().cloned() {
            self.advance();
            let rhs = self.parse_operand()?;
            return Ok(Expr::Compare {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    fn parse_operand(&mut self) -> Result<Expr, ExpressionError> {
        match self.advance() {
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(ExpressionError::UnexpectedToken {
                        found: other.to_string(),
                    }),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some(Token::Variable(raw)) => Ok(match raw.strip_suffix(".length") {
                Some(name) => Expr::Variable {
                    name: name.to_string(),
                    length: true,
                },
                None => Expr::Variable {
                    name: raw,
                    length: false,
                },
            }),
            Some(Token::Text(s)) => Ok(Expr::Literal(Literal::Text(s))),
            Some(Token::Number(n)) => Ok(Expr::Literal(Literal::Number(n))),
            Some(Token::Ident(word)) if word == "true" => Ok(Expr::Literal(Literal::Bool(true))),
            Some(Token::Ident(word)) if word == "false" => {
                Ok(Expr::Literal(Literal::Bool(false)))
            }
            Some(other) => Err(ExpressionError::UnexpectedToken {
                found: other.to_string(),
            }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

/// Runtime value of an operand
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl Operand {
    fn from_answer(value: Option<&AnswerValue>) -> Self {
        match value {
            None => Self::Missing,
            Some(AnswerValue::Bool(b)) => Self::Bool(*b),
            Some(AnswerValue::Number(n)) => Self::Number(*n),
            Some(AnswerValue::Text(s)) => Self::Text(s.clone()),
            Some(AnswerValue::List(items)) => Self::List(items.clone()),
            Some(AnswerValue::Files(files)) => {
                Self::List(files.iter().map(|f| f.name.clone()).collect())
            }
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Bool(_) | Self::Number(_) => false,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            other => !other.is_empty(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn equals(&self, other: &Operand) -> bool {
        match (self, other) {
            (Self::Missing, Self::Missing) => true,
            (Self::Missing, _) | (_, Self::Missing) => false,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bool(b), Self::Text(s)) | (Self::Text(s), Self::Bool(b)) => {
                s.eq_ignore_ascii_case(if *b { "true" } else { "false" })
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                let mut a = a.clone();
                let mut b = b.clone();
                a.sort();
                b.sort();
                a == b
            }
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl Expr {
    fn operand(&self, answers: &AnswerSet) -> Operand {
        match self {
            Expr::Literal(Literal::Bool(b)) => Operand::Bool(*b),
            Expr::Literal(Literal::Number(n)) => Operand::Number(*n),
            Expr::Literal(Literal::Text(s)) => Operand::Text(s.clone()),
            Expr::Variable { name, length: true } => {
                Operand::Number(answers.get(name).map(AnswerValue::length).unwrap_or(0) as f64)
            }
            Expr::Variable {
                name,
                length: false,
            } => Operand::from_answer(answers.get(name)),
            other => Operand::Bool(other.eval(answers)),
        }
    }

    /// Evaluate as a boolean against the current answers
    pub fn eval(&self, answers: &AnswerSet) -> bool {
        match self {
            Expr::Not(inner) => !inner.eval(answers),
            Expr::And(lhs, rhs) => lhs.eval(answers) && rhs.eval(answers),
            Expr::Or(lhs, rhs) => lhs.eval(answers) || rhs.eval(answers),
            Expr::IsEmpty { operand, negated } => operand.operand(answers).is_empty() != *negated,
            Expr::Compare { op, lhs, rhs } => {
                let lhs = lhs.operand(answers);
                let rhs = rhs.operand(answers);
                match op {
                    CompareOp::Eq => lhs.equals(&rhs),
                    CompareOp::NotEq => !lhs.equals(&rhs),
                    ordering => match (lhs.as_number(), rhs.as_number()) {
                        (Some(x), Some(y)) => match ordering {
                            CompareOp::Less => x < y,
                            CompareOp::LessEq => x <= y,
                            CompareOp::Greater => x > y,
                            _ => x >= y,
                        },
                        _ => false,
                    },
                }
            }
            literal_or_variable => literal_or_variable.operand(answers).truthy(),
        }
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Variable { name, .. } => out.push(name),
            Expr::Not(inner) => inner.collect_variables(out),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) | Expr::Compare { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
            Expr::IsEmpty { operand, .. } => operand.collect_variables(out),
        }
    }
}

/// A compiled expression together with its source text
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn eval(&self, answers: &AnswerSet) -> bool {
        self.ast.eval(answers)
    }

    /// Question names this expression reads
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.ast.collect_variables(&mut out);
        out
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(ExpressionError::Empty);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let ast = parser.parse_or()?;
        if let Some(extra) = parser.peek() {
            return Err(ExpressionError::UnexpectedToken {
                found: extra.to_string(),
            });
        }
        Ok(Self {
            source: source.to_string(),
            ast,
        })
    }
}

impl TryFrom<String> for Expression {
    type Error = ExpressionError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        source.parse()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
