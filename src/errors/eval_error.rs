use crate::types::filter_types::CmpOp;
use crate::types::storage_types::ValueType;
use std::error::Error;
use std::fmt;

/// Represents possible errors that can occur while compiling or evaluating a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The specified column name does not exist in the schema.
    UnknownColumn(String),

    /// An unqualified name matches more than one `alias.column` of a join schema.
    AmbiguousColumn(String),

    /// The types of the left and right operands cannot be compared.
    TypeMismatch {
        left: ValueType,
        right: ValueType,
        op: CmpOp,
    },

    /// A literal cannot be stored in / compared with a column of the given type.
    LiteralType { column: String, literal: String },

    /// Expression shape the evaluator does not implement.
    Unsupported(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownColumn(name) => write!(f, "unknown column: {}", name),
            EvalError::AmbiguousColumn(name) => write!(f, "ambiguous column reference: {}", name),
            EvalError::TypeMismatch { left, right, op } => write!(
                f,
                "type mismatch for {}: left is {}, right is {}",
                op, left, right
            ),
            EvalError::LiteralType { column, literal } => {
                write!(f, "literal {} is not valid for column '{}'", literal, column)
            }
            EvalError::Unsupported(what) => write!(f, "unsupported expression: {}", what),
        }
    }
}

// Allows EvalError to be used as a standard error type.
impl Error for EvalError {}

/// Convenience alias for results returned by evaluation functions.
pub type EvalResult<T> = Result<T, EvalError>;
