//! Evaluates compiled conditions against records.
//!
//! ```
//! use condition_engine::{Value, check};
//! use std::collections::HashMap;
//!
//! let record = HashMap::from([
//!     ("Height".to_string(), Value::Int(170)),
//!     ("Male".to_string(), Value::Boolean(false)),
//! ]);
//!
//! assert!(check("$Height > 100 AND $Male == false", &record).unwrap());
//! ```

pub mod error;
pub mod eval;
pub mod record;
pub mod value;

pub use condition_syntax::{
    BinaryOperator, BooleanCase, Expression, ExpressionKind, Literal, LiteralKind, SyntaxError,
    SyntaxOptions, compile, compile_with,
};
pub use error::{ConditionError, ErrorCategory, EvalError};
pub use eval::{Clock, Evaluator, FixedClock, SystemClock, check, evaluate, evaluate_opt};
pub use record::{Record, RecordShape};
pub use value::Value;
