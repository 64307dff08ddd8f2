//! Formula evaluation against a record's fields.
//!
//! Evaluation is total: any parsed formula yields a value for any record.
//! Missing fields evaluate to blank, which compares as the empty string.

use std::cmp::Ordering;

use super::lexer::CompareOp;
use super::parser::{Expr, Function};
use crate::types::field_value::format_number;
use crate::types::{FieldValue, Fields};

/// Intermediate value produced while evaluating a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Blank,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl Value {
    fn from_field(value: Option<&FieldValue>) -> Self {
        match value {
            None | Some(FieldValue::Null) => Self::Blank,
            Some(FieldValue::Boolean(b)) => Self::Boolean(*b),
            Some(FieldValue::Number(n)) => n.as_f64().map_or(Self::Blank, Self::Number),
            Some(FieldValue::String(s)) => Self::Text(s.clone()),
            Some(other) => Self::Text(other.to_formula_text()),
        }
    }

    /// The numeric reading of this value, if it looks numeric.
    ///
    /// Booleans are 1 and 0. Text looks numeric when it parses as a finite
    /// number after trimming. Blank never looks numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Blank => None,
            Self::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    /// The text reading of this value.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Boolean(b) => if *b { "1" } else { "0" }.to_owned(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }

    /// Whether this value counts as true in a boolean position.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Blank => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

/// Compare two values, numerically when both look numeric and as strings
/// otherwise.
#[must_use]
pub fn compare(op: CompareOp, left: &Value, right: &Value) -> bool {
    let ordering = match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => Some(left.as_text().cmp(&right.as_text())),
    };
    let Some(ordering) = ordering else {
        return op == CompareOp::NotEq;
    };
    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::NotEq => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::LtEq => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::GtEq => ordering != Ordering::Less,
    }
}

/// Evaluate an expression against a record's fields.
#[must_use]
pub fn evaluate(expr: &Expr, fields: &Fields) -> Value {
    match expr {
        Expr::Text(s) => Value::Text(s.clone()),
        Expr::Number(n) => Value::Number(*n),
        Expr::Field(name) => Value::from_field(fields.get(name)),
        Expr::Compare { op, left, right } => {
            let left = evaluate(left, fields);
            let right = evaluate(right, fields);
            Value::Boolean(compare(*op, &left, &right))
        }
        Expr::Call { function, args } => call(*function, args, fields),
    }
}

fn call(function: Function, args: &[Expr], fields: &Fields) -> Value {
    let truthy = |arg: &Expr| evaluate(arg, fields).is_truthy();
    match function {
        Function::And => Value::Boolean(args.iter().all(truthy)),
        Function::Or => Value::Boolean(args.iter().any(truthy)),
        Function::Xor => Value::Boolean(args.iter().filter(|&arg| truthy(arg)).count() % 2 == 1),
        Function::Not => Value::Boolean(!args.first().is_some_and(truthy)),
        Function::True => Value::Boolean(true),
        Function::False => Value::Boolean(false),
        Function::Blank => Value::Blank,
    }
}
