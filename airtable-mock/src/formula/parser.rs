//! Formula parser.
//!
//! Grammar:
//!
//! ```text
//! formula    := comparison EOF
//! comparison := operand (compare_op operand)*
//! operand    := STRING | NUMBER | '-' NUMBER | '{' field '}' | IDENT
//!             | IDENT '(' [comparison (',' comparison)*] ')'
//!             | '(' comparison ')'
//! ```
//!
//! A bare identifier not followed by `(` is a field reference.

use super::lexer::{CompareOp, Spanned, Token, tokenize};
use crate::error::FormulaError;

/// Formula syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Text(String),
    Number(f64),
    Field(String),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    And,
    Or,
    Xor,
    Not,
    True,
    False,
    Blank,
}

impl Function {
    /// Look up a function by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "XOR" => Some(Self::Xor),
            "NOT" => Some(Self::Not),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "BLANK" => Some(Self::Blank),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Blank => "BLANK",
        }
    }

    /// Allowed argument counts, as `(min, max)`.
    const fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::And | Self::Or | Self::Xor => (1, None),
            Self::Not => (1, Some(1)),
            Self::True | Self::False | Self::Blank => (0, Some(0)),
        }
    }
}

/// Parse a formula into a syntax tree.
pub fn parse(source: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        index: 0,
        end: source.len(),
    };
    if parser.tokens.is_empty() {
        return Err(FormulaError::new("empty formula", 0));
    }
    let expr = parser.comparison()?;
    if let Some(extra) = parser.peek() {
        return Err(FormulaError::new(
            format!("unexpected {}", extra.token.describe()),
            extra.position,
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    index: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.index).cloned();
        if spanned.is_some() {
            self.index += 1;
        }
        spanned
    }

    fn next_is(&self, token: &Token) -> bool {
        self.peek().is_some_and(|s| &s.token == token)
    }

    fn expect(&mut self, token: &Token) -> Result<(), FormulaError> {
        match self.advance() {
            Some(s) if &s.token == token => Ok(()),
            Some(s) => Err(FormulaError::new(
                format!("expected {}, found {}", token.describe(), s.token.describe()),
                s.position,
            )),
            None => Err(FormulaError::new(
                format!("expected {}, found end of formula", token.describe()),
                self.end,
            )),
        }
    }

    fn comparison(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.operand()?;
        while let Some(Spanned {
            token: Token::Compare(op),
            ..
        }) = self.peek()
        {
            let op = *op;
            self.index += 1;
            let right = self.operand()?;
            left = Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn operand(&mut self) -> Result<Expr, FormulaError> {
        let Some(Spanned { token, position }) = self.advance() else {
            return Err(FormulaError::new("unexpected end of formula", self.end));
        };
        match token {
            Token::Text(text) => Ok(Expr::Text(text)),
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Field(name) => Ok(Expr::Field(name)),
            Token::Minus => match self.advance() {
                Some(Spanned {
                    token: Token::Number(n),
                    ..
                }) => Ok(Expr::Number(-n)),
                _ => Err(FormulaError::new("expected a number after '-'", position)),
            },
            Token::LParen => {
                let inner = self.comparison()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) if self.next_is(&Token::LParen) => self.call(&name, position),
            Token::Ident(name) => Ok(Expr::Field(name)),
            other => Err(FormulaError::new(
                format!("unexpected {}", other.describe()),
                position,
            )),
        }
    }

    fn call(&mut self, name: &str, position: usize) -> Result<Expr, FormulaError> {
        let function = Function::from_name(name)
            .ok_or_else(|| FormulaError::new(format!("unknown function '{name}'"), position))?;
        self.expect(&Token::LParen)?;

        let mut args = Vec::new();
        if !self.next_is(&Token::RParen) {
            args.push(self.comparison()?);
            while self.next_is(&Token::Comma) {
                self.index += 1;
                args.push(self.comparison()?);
            }
        }
        self.expect(&Token::RParen)?;

        let (min, max) = function.arity();
        if args.len() < min || max.is_some_and(|max| args.len() > max) {
            return Err(FormulaError::new(
                format!(
                    "{}() does not take {} argument(s)",
                    function.name(),
                    args.len()
                ),
                position,
            ));
        }

        Ok(Expr::Call { function, args })
    }
}
