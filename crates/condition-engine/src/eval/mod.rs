use crate::{
    error::{ConditionError, EvalError, Result},
    record::{Record, RecordShape},
};
use binary::BinaryOpEvaluator;
use condition_syntax::{Expression, ExpressionKind, Literal, compile};
use std::borrow::Cow;
use tracing::{debug, trace};

pub mod clock;

mod binary;

pub use clock::{Clock, FixedClock, SystemClock};

static TRUE: Literal = Literal::TRUE;
static FALSE: Literal = Literal::FALSE;

/// Reduces a compiled [`Expression`] against a [`Record`] to a boolean.
///
/// The tree is only read, so one expression can be evaluated against many
/// records, from many threads, as often as needed.
#[derive(Debug, Clone, Default)]
pub struct Evaluator<C = SystemClock> {
    clock: C,
}

impl Evaluator {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> Evaluator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn evaluate<R: Record + ?Sized>(&self, expr: &Expression, record: &R) -> Result<bool> {
        if let RecordShape::Other(kind) = record.shape() {
            return Err(EvalError::NotMapOrStruct { kind });
        }

        match &*self.reduce(expr, record)? {
            Literal::Boolean(result) => {
                debug!(expression = %expr, result, "Evaluated condition");
                Ok(*result)
            }
            other => Err(EvalError::UnexpectedRootResult {
                found: format!("{} {other}", other.kind()),
            }),
        }
    }

    /// Like [`evaluate`](Self::evaluate), for callers that may not have an
    /// expression at all.
    pub fn evaluate_opt<R: Record + ?Sized>(
        &self,
        expr: Option<&Expression>,
        record: &R,
    ) -> Result<bool> {
        match expr {
            Some(expr) => self.evaluate(expr, record),
            None => Err(EvalError::MissingExpression),
        }
    }

    /// Both sides of a binary node are always reduced, left first, so a type
    /// error on the right is reported even when the left already decides.
    fn reduce<'e, R: Record + ?Sized>(
        &self,
        expr: &'e Expression,
        record: &R,
    ) -> Result<Cow<'e, Literal>> {
        match &expr.kind {
            ExpressionKind::Literal(literal) => Ok(Cow::Borrowed(literal)),
            ExpressionKind::VarRef(name) => resolve(name, record).map(Cow::Owned),
            ExpressionKind::Paren(inner) => self.reduce(inner, record),
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.reduce(left, record)?;
                let right = self.reduce(right, record)?;
                let result = BinaryOpEvaluator::new(&left, &right, *operator, &self.clock).evaluate()?;

                trace!(%left, %operator, %right, result, "Applied operator");

                Ok(Cow::Borrowed(if result { &TRUE } else { &FALSE }))
            }
        }
    }
}

fn resolve<R: Record + ?Sized>(name: &str, record: &R) -> Result<Literal> {
    let value = record
        .lookup(name)
        .ok_or_else(|| EvalError::FieldNotFound {
            name: name.to_string(),
            shape: record.shape(),
        })?;

    let literal = value
        .to_literal()
        .ok_or_else(|| EvalError::UnsupportedType {
            name: name.to_string(),
            type_name: value.type_name(),
        })?;

    trace!(variable = name, value = %literal, "Resolved variable");
    Ok(literal)
}

/// Evaluate `expr` against `record` using the system clock.
pub fn evaluate<R: Record + ?Sized>(expr: &Expression, record: &R) -> Result<bool> {
    Evaluator::new().evaluate(expr, record)
}

/// Evaluate an optional expression. `None` is an error, not `false`.
pub fn evaluate_opt<R: Record + ?Sized>(expr: Option<&Expression>, record: &R) -> Result<bool> {
    Evaluator::new().evaluate_opt(expr, record)
}

/// Compile `text` and evaluate it once.
pub fn check<R: Record + ?Sized>(text: &str, record: &R) -> std::result::Result<bool, ConditionError> {
    let expr = compile(text)?;
    Ok(evaluate(&expr, record)?)
}
