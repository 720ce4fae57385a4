use crate::{ast::operator::BinaryOperator, options::BooleanCase};
use std::{fmt, time::Duration};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: (usize, usize),
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    String(String),
    Number(f64),
    Duration(Duration),
    Boolean(bool),

    // Names
    Identifier(String),
    Variable(String),

    // Logical operators
    And,
    Or,
    Xor,
    Nand,

    // Comparison operators
    Equal,          // ==
    NotEqual,       // !=
    GreaterThan,    // >
    GreaterOrEqual, // >=
    LessThan,       // <
    LessOrEqual,    // <=

    // Membership and pattern operators
    In,
    NotIn,
    Contains,
    Before,
    Ereg,
    Nereg,

    // Delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,

    // Special
    Illegal(String),
    Eof,
}

impl TokenKind {
    /// Classifies a bare word. Operator keywords are case-sensitive, boolean
    /// literals follow `boolean_case`.
    pub fn from_word(word: &str, boolean_case: BooleanCase) -> TokenKind {
        match word {
            "AND" => return TokenKind::And,
            "OR" => return TokenKind::Or,
            "XOR" => return TokenKind::Xor,
            "NAND" => return TokenKind::Nand,
            "IN" => return TokenKind::In,
            "NOTIN" => return TokenKind::NotIn,
            "CONTAINS" => return TokenKind::Contains,
            "BEFORE" => return TokenKind::Before,
            "EREG" => return TokenKind::Ereg,
            "NEREG" => return TokenKind::Nereg,
            _ => {}
        }

        match boolean_case.parse(word) {
            Some(value) => TokenKind::Boolean(value),
            None => TokenKind::Identifier(word.to_string()),
        }
    }

    /// The binary operator this token spells, if any.
    pub fn binary_operator(&self) -> Option<BinaryOperator> {
        Some(match self {
            TokenKind::And => BinaryOperator::And,
            TokenKind::Or => BinaryOperator::Or,
            TokenKind::Xor => BinaryOperator::Xor,
            TokenKind::Nand => BinaryOperator::Nand,
            TokenKind::Equal => BinaryOperator::Equal,
            TokenKind::NotEqual => BinaryOperator::NotEqual,
            TokenKind::GreaterThan => BinaryOperator::GreaterThan,
            TokenKind::GreaterOrEqual => BinaryOperator::GreaterOrEqual,
            TokenKind::LessThan => BinaryOperator::LessThan,
            TokenKind::LessOrEqual => BinaryOperator::LessOrEqual,
            TokenKind::In => BinaryOperator::In,
            TokenKind::NotIn => BinaryOperator::NotIn,
            TokenKind::Contains => BinaryOperator::Contains,
            TokenKind::Before => BinaryOperator::Before,
            TokenKind::Ereg => BinaryOperator::Ereg,
            TokenKind::Nereg => BinaryOperator::Nereg,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = self.binary_operator() {
            return write!(f, "{}", op);
        }

        match self {
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Duration(d) => write!(f, "{:?}", d),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::Identifier(s) => write!(f, "{}", s),
            TokenKind::Variable(s) => write!(f, "${}", s),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Illegal(s) => write!(f, "{}", s),
            TokenKind::Eof => write!(f, "EOF"),
            _ => Ok(()),
        }
    }
}
