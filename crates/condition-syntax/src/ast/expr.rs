use crate::ast::{literal::Literal, operator::BinaryOperator, span::Span};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        let span = left.span.to(right.span);
        Expression::new(
            ExpressionKind::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn paren(inner: Expression, span: Span) -> Self {
        Expression::new(ExpressionKind::Paren(Box::new(inner)), span)
    }

    pub fn var_ref(name: impl Into<String>, span: Span) -> Self {
        Expression::new(ExpressionKind::VarRef(name.into()), span)
    }

    pub fn literal(literal: Literal, span: Span) -> Self {
        Expression::new(ExpressionKind::Literal(literal), span)
    }

    /// Names of all referenced variables in source order, duplicates included.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match &self.kind {
            ExpressionKind::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            ExpressionKind::Paren(inner) => inner.collect_variables(names),
            ExpressionKind::VarRef(name) => names.push(name),
            ExpressionKind::Literal(_) => {}
        }
    }
}

/// Expression types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// Explicit grouping. Precedence is already resolved by the parser, so
    /// this only forwards to its inner expression.
    Paren(Box<Expression>),
    /// Variable reference, without the `$` sigil.
    VarRef(String),
    Literal(Literal),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            ExpressionKind::Paren(inner) => write!(f, "({})", inner),
            ExpressionKind::VarRef(name) => write!(f, "${}", name),
            ExpressionKind::Literal(literal) => write!(f, "{}", literal),
        }
    }
}
