//! Condition language front end.
//!
//! Turns text such as `$Height > 100 AND $Male == false` into an
//! [`Expression`] tree. The tree is plain data and can be evaluated any
//! number of times by `condition-engine`.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;

pub use ast::{BinaryOperator, Expression, ExpressionKind, Literal, LiteralKind, Span};
pub use error::SyntaxError;
pub use options::{BooleanCase, SyntaxOptions};
pub use parser::{Parser, compile, compile_with};
