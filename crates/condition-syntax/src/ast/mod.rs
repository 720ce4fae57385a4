pub mod expr;
pub mod literal;
pub mod operator;
pub mod span;

pub use expr::{Expression, ExpressionKind};
pub use literal::{Literal, LiteralKind};
pub use operator::{BinaryOperator, Precedence};
pub use span::Span;
