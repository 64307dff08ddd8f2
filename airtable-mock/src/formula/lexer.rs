//! Tokenizer for formulas.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::FormulaError;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{Field Name}`
    Field(String),
    /// A function name, or a bare field name.
    Ident(String),
    Text(String),
    Number(f64),
    Compare(CompareOp),
    Minus,
    LParen,
    RParen,
    Comma,
}

impl Token {
    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Field(name) => format!("field {{{name}}}"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Text(_) => "string literal".to_owned(),
            Self::Number(n) => format!("number {n}"),
            Self::Compare(op) => format!("'{}'", op.symbol()),
            Self::Minus => "'-'".to_owned(),
            Self::LParen => "'('".to_owned(),
            Self::RParen => "')'".to_owned(),
            Self::Comma => "','".to_owned(),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Split a formula into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, FormulaError> {
    let mut lexer = Lexer {
        chars: source.char_indices().peekable(),
        source,
    };
    let mut tokens = Vec::new();
    while let Some(spanned) = lexer.next_token()? {
        tokens.push(spanned);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    source: &'a str,
}

impl Lexer<'_> {
    fn next_token(&mut self) -> Result<Option<Spanned>, FormulaError> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some((position, c)) = self.chars.next() else {
            return Ok(None);
        };

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '-' => Token::Minus,
            '=' => Token::Compare(CompareOp::Eq),
            '!' => {
                if self.chars.next_if(|(_, c)| *c == '=').is_none() {
                    return Err(FormulaError::new("expected '=' after '!'", position));
                }
                Token::Compare(CompareOp::NotEq)
            }
            '<' => {
                if self.chars.next_if(|(_, c)| *c == '=').is_some() {
                    Token::Compare(CompareOp::LtEq)
                } else {
                    Token::Compare(CompareOp::Lt)
                }
            }
            '>' => {
                if self.chars.next_if(|(_, c)| *c == '=').is_some() {
                    Token::Compare(CompareOp::GtEq)
                } else {
                    Token::Compare(CompareOp::Gt)
                }
            }
            '{' => Token::Field(self.field_name(position)?),
            '"' | '\'' => Token::Text(self.text(c, position)?),
            c if c.is_ascii_digit() => Token::Number(self.number(position)?),
            c if c.is_alphabetic() || c == '_' => Token::Ident(self.ident(position)),
            other => {
                return Err(FormulaError::new(
                    format!("unexpected character '{other}'"),
                    position,
                ));
            }
        };

        Ok(Some(Spanned { token, position }))
    }

    /// Read up to the closing `}`; the opening brace is already consumed.
    fn field_name(&mut self, start: usize) -> Result<String, FormulaError> {
        let mut name = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == '}' {
                return Ok(name);
            }
            name.push(c);
        }
        Err(FormulaError::new("unterminated field reference", start))
    }

    /// Read a quoted string; the opening delimiter is already consumed.
    ///
    /// A delimiter inside the string is written twice (`'a''b'`) or escaped
    /// with a backslash (`'a\'b'`).
    fn text(&mut self, delimiter: char, start: usize) -> Result<String, FormulaError> {
        let mut text = String::new();
        while let Some((_, c)) = self.chars.next() {
            if c == delimiter {
                if self.chars.next_if(|(_, c)| *c == delimiter).is_some() {
                    text.push(delimiter);
                    continue;
                }
                return Ok(text);
            }
            if c == '\\' {
                match self.chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => break,
                }
                continue;
            }
            text.push(c);
        }
        Err(FormulaError::new("unterminated string literal", start))
    }

    /// Read an integer or decimal; the first digit is already consumed.
    fn number(&mut self, start: usize) -> Result<f64, FormulaError> {
        let mut end = start + 1;
        while let Some((i, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
            end = i + c.len_utf8();
        }
        if let Some((i, _)) = self.chars.next_if(|(_, c)| *c == '.') {
            end = i + 1;
            let mut fraction_digits = 0;
            while let Some((i, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
                end = i + c.len_utf8();
                fraction_digits += 1;
            }
            if fraction_digits == 0 {
                return Err(FormulaError::new("expected digits after '.'", i));
            }
        }
        self.source[start..end]
            .parse()
            .map_err(|_| FormulaError::new("invalid number", start))
    }

    /// Read an identifier; the first character is already consumed.
    fn ident(&mut self, start: usize) -> String {
        let mut end = self.source.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                end = i;
                break;
            }
            self.chars.next();
        }
        self.source[start..end].to_owned()
    }
}
