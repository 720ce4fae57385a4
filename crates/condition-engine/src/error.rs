use crate::record::RecordShape;
use condition_syntax::{BinaryOperator, LiteralKind, SyntaxError};
use thiserror::Error;

/// Coarse grouping of evaluation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A `$variable` could not be turned into a value.
    Resolution,
    /// An operator received operands it does not accept.
    TypeMismatch,
    /// The tree as a whole does not produce a boolean.
    Semantic,
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Record of type `{kind}` is not a map or struct")]
    NotMapOrStruct { kind: &'static str },

    #[error("Argument `{name}` not found in {shape}")]
    FieldNotFound { name: String, shape: RecordShape },

    #[error("Unsupported argument `{name}` type: {type_name}")]
    UnsupportedType {
        name: String,
        type_name: &'static str,
    },

    #[error("Operator {operator} expects {expected}, got {found}")]
    TypeMismatch {
        operator: BinaryOperator,
        expected: &'static str,
        found: LiteralKind,
    },

    #[error("Cannot compare {kind} with non-{kind}")]
    Incomparable { kind: LiteralKind },

    #[error("Invalid regular expression `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unexpected result of the root expression: {found}")]
    UnexpectedRootResult { found: String },

    #[error("Provided expression is missing")]
    MissingExpression,
}

impl EvalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvalError::NotMapOrStruct { .. }
            | EvalError::FieldNotFound { .. }
            | EvalError::UnsupportedType { .. } => ErrorCategory::Resolution,
            EvalError::TypeMismatch { .. }
            | EvalError::Incomparable { .. }
            | EvalError::InvalidPattern { .. } => ErrorCategory::TypeMismatch,
            EvalError::UnexpectedRootResult { .. } | EvalError::MissingExpression => {
                ErrorCategory::Semantic
            }
        }
    }
}

/// Either stage of compiling and evaluating condition text.
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("Failed to compile condition: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Failed to evaluate condition: {0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, EvalError>;
