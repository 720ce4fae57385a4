use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    And,
    Or,
    Xor,
    Nand,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    In,
    NotIn,
    Contains,
    Before,
    Ereg,
    Nereg,
}

/// Binding strength of a binary operator, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Logical,
    Comparison,
}

impl Precedence {
    pub const LOWEST: Precedence = Precedence::Logical;

    /// The next tighter level, or `None` when only operands bind tighter.
    pub fn tighter(self) -> Option<Precedence> {
        match self {
            Precedence::Logical => Some(Precedence::Comparison),
            Precedence::Comparison => None,
        }
    }
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 16] = [
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::Xor,
        BinaryOperator::Nand,
        BinaryOperator::Equal,
        BinaryOperator::NotEqual,
        BinaryOperator::GreaterThan,
        BinaryOperator::GreaterOrEqual,
        BinaryOperator::LessThan,
        BinaryOperator::LessOrEqual,
        BinaryOperator::In,
        BinaryOperator::NotIn,
        BinaryOperator::Contains,
        BinaryOperator::Before,
        BinaryOperator::Ereg,
        BinaryOperator::Nereg,
    ];

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor | BinaryOperator::Nand => {
                Precedence::Logical
            }
            _ => Precedence::Comparison,
        }
    }

    pub fn is_logical(self) -> bool {
        self.precedence() == Precedence::Logical
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::Nand => "NAND",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::In => "IN",
            BinaryOperator::NotIn => "NOTIN",
            BinaryOperator::Contains => "CONTAINS",
            BinaryOperator::Before => "BEFORE",
            BinaryOperator::Ereg => "EREG",
            BinaryOperator::Nereg => "NEREG",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
