use crate::{
    error::{EvalError, Result},
    eval::clock::Clock,
};
use chrono::TimeDelta;
use condition_syntax::{BinaryOperator, Literal, LiteralKind};
use regex::Regex;

const SECONDS_PER_DAY: i64 = 86_400;

/// Applies one binary operator to two already reduced operands.
pub(crate) struct BinaryOpEvaluator<'a> {
    left: &'a Literal,
    right: &'a Literal,
    op: BinaryOperator,
    clock: &'a dyn Clock,
}

impl<'a> BinaryOpEvaluator<'a> {
    pub fn new(
        left: &'a Literal,
        right: &'a Literal,
        op: BinaryOperator,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            left,
            right,
            op,
            clock,
        }
    }

    pub fn evaluate(&self) -> Result<bool> {
        use BinaryOperator::*;

        match self.op {
            And => self.booleans().map(|(l, r)| l && r),
            Or => self.booleans().map(|(l, r)| l || r),
            Xor => self.booleans().map(|(l, r)| l != r),
            Nand => self.booleans().map(|(l, r)| !(l && r)),
            Equal => self.eval_equal(),
            NotEqual => self.eval_equal().map(|eq| !eq),
            GreaterThan => Ok(self.number(self.left)? > self.number(self.right)?),
            GreaterOrEqual => Ok(self.number(self.left)? >= self.number(self.right)?),
            LessThan => Ok(self.number(self.left)? < self.number(self.right)?),
            LessOrEqual => Ok(self.number(self.left)? <= self.number(self.right)?),
            In => self.eval_in(),
            NotIn => self.eval_in().map(|found| !found),
            Contains => self.eval_contains(),
            Before => self.eval_before(),
            Ereg => self.eval_ereg(),
            Nereg => self.eval_ereg().map(|matched| !matched),
        }
    }

    /// Tries string, then number, then boolean. Once the left side picks a
    /// kind the right side has to match it.
    fn eval_equal(&self) -> Result<bool> {
        match (self.left, self.right) {
            (Literal::String(l), Literal::String(r)) => Ok(l == r),
            (Literal::String(_), _) => Err(EvalError::Incomparable {
                kind: LiteralKind::String,
            }),
            (Literal::Number(l), Literal::Number(r)) => Ok(l == r),
            (Literal::Number(_), _) => Err(EvalError::Incomparable {
                kind: LiteralKind::Number,
            }),
            (Literal::Boolean(l), Literal::Boolean(r)) => Ok(l == r),
            (Literal::Boolean(_), _) => Err(EvalError::Incomparable {
                kind: LiteralKind::Boolean,
            }),
            (other, _) => Err(self.mismatch("string, number or boolean", other)),
        }
    }

    /// An empty list has no element kind, so it matches neither strings nor
    /// numbers rather than rejecting one of them.
    fn eval_in(&self) -> Result<bool> {
        match self.left {
            Literal::String(needle) => match self.right {
                Literal::StringList(items) => Ok(scan(items, needle)),
                Literal::NumberList(items) if items.is_empty() => Ok(false),
                other => Err(self.mismatch("slice of string", other)),
            },
            Literal::Number(needle) => match self.right {
                Literal::NumberList(items) => Ok(scan(items, needle)),
                Literal::StringList(items) if items.is_empty() => Ok(false),
                other => Err(self.mismatch("slice of number", other)),
            },
            other => Err(self.mismatch("string or number", other)),
        }
    }

    fn eval_contains(&self) -> Result<bool> {
        match self.right {
            Literal::String(needle) => match self.left {
                Literal::String(haystack) => Ok(haystack.contains(needle.as_str())),
                Literal::StringList(items) => Ok(scan(items, needle)),
                Literal::NumberList(items) if items.is_empty() => Ok(false),
                other => Err(self.mismatch("string or slice of string", other)),
            },
            Literal::Number(needle) => match self.left {
                Literal::NumberList(items) => Ok(scan(items, needle)),
                Literal::StringList(items) if items.is_empty() => Ok(false),
                other => Err(self.mismatch("slice of number", other)),
            },
            other => Err(self.mismatch("string or number", other)),
        }
    }

    /// True when strictly more than the given span has passed since the left
    /// timestamp. A number on the right is a day count truncated toward zero.
    fn eval_before(&self) -> Result<bool> {
        let since = match self.left {
            Literal::Time(t) => *t,
            other => return Err(self.mismatch("time", other)),
        };

        let threshold = match self.right {
            Literal::Number(days) => (days.trunc() as i64)
                .checked_mul(SECONDS_PER_DAY)
                .and_then(TimeDelta::try_seconds),
            Literal::Duration(duration) => TimeDelta::from_std(*duration).ok(),
            other => return Err(self.mismatch("number or duration", other)),
        };

        let elapsed = self.clock.now().signed_duration_since(since);

        // A span too large to represent has never elapsed.
        Ok(threshold.is_some_and(|threshold| elapsed > threshold))
    }

    fn eval_ereg(&self) -> Result<bool> {
        let subject = self.string(self.left)?;
        let pattern = self.string(self.right)?;

        let regex = Regex::new(pattern).map_err(|source| EvalError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(regex.is_match(subject))
    }

    /// Checks both operands before combining them, so the right side is
    /// validated even when the left already decides the result.
    fn booleans(&self) -> Result<(bool, bool)> {
        let left = self.boolean(self.left)?;
        let right = self.boolean(self.right)?;
        Ok((left, right))
    }

    fn boolean(&self, literal: &Literal) -> Result<bool> {
        match literal {
            Literal::Boolean(b) => Ok(*b),
            other => Err(self.mismatch("boolean", other)),
        }
    }

    fn number(&self, literal: &Literal) -> Result<f64> {
        match literal {
            Literal::Number(n) => Ok(*n),
            other => Err(self.mismatch("number", other)),
        }
    }

    fn string<'l>(&self, literal: &'l Literal) -> Result<&'l str> {
        match literal {
            Literal::String(s) => Ok(s),
            other => Err(self.mismatch("string", other)),
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Literal) -> EvalError {
        EvalError::TypeMismatch {
            operator: self.op,
            expected,
            found: found.kind(),
        }
    }
}

/// Walks the whole slice rather than stopping at the first hit.
fn scan<T: PartialEq>(items: &[T], needle: &T) -> bool {
    let mut found = false;
    for item in items {
        if item == needle {
            found = true;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::clock::FixedClock;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use std::time::Duration;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    fn apply(op: BinaryOperator, left: Literal, right: Literal) -> Result<bool> {
        let clock = clock();
        BinaryOpEvaluator::new(&left, &right, op, &clock).evaluate()
    }

    fn s(value: &str) -> Literal {
        Literal::String(value.to_string())
    }

    fn strings(values: &[&str]) -> Literal {
        Literal::StringList(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_logical_truth_tables() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        for (a, b) in cases {
            let l = Literal::Boolean(a);
            let r = Literal::Boolean(b);
            assert_eq!(apply(BinaryOperator::And, l.clone(), r.clone()).unwrap(), a && b);
            assert_eq!(apply(BinaryOperator::Or, l.clone(), r.clone()).unwrap(), a || b);
            assert_eq!(apply(BinaryOperator::Xor, l.clone(), r.clone()).unwrap(), a != b);
            assert_eq!(apply(BinaryOperator::Nand, l, r).unwrap(), !(a && b));
        }
    }

    #[test]
    fn test_logical_requires_booleans() {
        let err = apply(BinaryOperator::And, Literal::Boolean(true), Literal::Number(1.0)).unwrap_err();
        assert!(matches!(
            err,
            EvalError::TypeMismatch {
                operator: BinaryOperator::And,
                expected: "boolean",
                found: LiteralKind::Number,
            }
        ));
    }

    #[test]
    fn test_logical_checks_right_operand_when_left_decides() {
        let cases = [
            (BinaryOperator::And, Literal::FALSE, Literal::Number(1.0)),
            (BinaryOperator::Or, Literal::TRUE, s("x")),
            (BinaryOperator::Nand, Literal::FALSE, Literal::Number(1.0)),
            (BinaryOperator::Or, Literal::TRUE, Literal::Number(1.0)),
        ];

        for (op, left, right) in cases {
            let err = apply(op, left.clone(), right.clone()).unwrap_err();
            assert!(
                matches!(err, EvalError::TypeMismatch { expected: "boolean", .. }),
                "{left} {op} {right}: {err:?}"
            );
        }
    }

    #[test]
    fn test_empty_lists_match_nothing() {
        let no_strings = Literal::StringList(vec![]);
        let no_numbers = Literal::NumberList(vec![]);

        assert!(!apply(BinaryOperator::In, Literal::Number(5.0), no_strings.clone()).unwrap());
        assert!(apply(BinaryOperator::NotIn, Literal::Number(5.0), no_strings.clone()).unwrap());
        assert!(!apply(BinaryOperator::In, s("a"), no_numbers.clone()).unwrap());
        assert!(!apply(BinaryOperator::Contains, no_strings.clone(), Literal::Number(5.0)).unwrap());
        assert!(!apply(BinaryOperator::Contains, no_numbers.clone(), s("a")).unwrap());

        // Non-empty lists still have to match the needle's kind.
        assert!(apply(BinaryOperator::In, Literal::Number(5.0), strings(&["5"])).is_err());
    }

    #[test]
    fn test_equality_by_kind() {
        assert!(apply(BinaryOperator::Equal, s("a"), s("a")).unwrap());
        assert!(apply(BinaryOperator::Equal, Literal::Number(1.0), Literal::Number(1.0)).unwrap());
        assert!(apply(BinaryOperator::Equal, Literal::FALSE, Literal::FALSE).unwrap());
        assert!(apply(BinaryOperator::NotEqual, s("a"), s("b")).unwrap());
    }

    #[test]
    fn test_equality_mismatch_messages() {
        let err = apply(BinaryOperator::Equal, s("1"), Literal::Number(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot compare string with non-string");

        let err = apply(BinaryOperator::NotEqual, Literal::Number(1.0), s("1")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot compare number with non-number");

        let err = apply(BinaryOperator::Equal, Literal::TRUE, Literal::Number(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot compare boolean with non-boolean");
    }

    #[test]
    fn test_equality_rejects_other_kinds() {
        let err = apply(BinaryOperator::Equal, strings(&["a"]), strings(&["a"])).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { found: LiteralKind::StringList, .. }));
    }

    #[test]
    fn test_ordering_requires_numbers() {
        assert!(apply(BinaryOperator::GreaterOrEqual, Literal::Number(2.0), Literal::Number(2.0)).unwrap());
        assert!(apply(BinaryOperator::LessThan, Literal::Number(1.0), Literal::Number(2.0)).unwrap());
        assert!(!apply(BinaryOperator::LessOrEqual, Literal::Number(3.0), Literal::Number(2.0)).unwrap());
        assert!(apply(BinaryOperator::GreaterThan, s("b"), s("a")).is_err());
    }

    #[test]
    fn test_in_and_notin() {
        assert!(apply(BinaryOperator::In, s("b"), strings(&["a", "b"])).unwrap());
        assert!(apply(BinaryOperator::NotIn, s("c"), strings(&["a", "b"])).unwrap());
        assert!(apply(BinaryOperator::In, Literal::Number(2.0), Literal::NumberList(vec![1.0, 2.0])).unwrap());
        assert!(apply(BinaryOperator::In, s("a"), Literal::NumberList(vec![1.0])).is_err());
        assert!(apply(BinaryOperator::In, Literal::Number(1.0), strings(&["1"])).is_err());
        assert!(apply(BinaryOperator::In, Literal::TRUE, strings(&["true"])).is_err());
    }

    #[test]
    fn test_in_with_duplicates() {
        assert!(apply(BinaryOperator::In, s("a"), strings(&["a", "x", "a"])).unwrap());
    }

    #[test]
    fn test_contains() {
        assert!(apply(BinaryOperator::Contains, s("foobar"), s("oba")).unwrap());
        assert!(!apply(BinaryOperator::Contains, s("foobar"), s("baz")).unwrap());
        assert!(apply(BinaryOperator::Contains, strings(&["A", "B"]), s("A")).unwrap());
        assert!(apply(BinaryOperator::Contains, Literal::NumberList(vec![1.0, 5.0]), Literal::Number(5.0)).unwrap());
        assert!(apply(BinaryOperator::Contains, strings(&["5"]), Literal::Number(5.0)).is_err());
        assert!(apply(BinaryOperator::Contains, Literal::Number(5.0), s("5")).is_err());
        assert!(apply(BinaryOperator::Contains, s("x"), Literal::TRUE).is_err());
    }

    #[test]
    fn test_before_days() {
        let now = clock().0;
        let two_days_ago = Literal::Time(now - ChronoDuration::hours(48));

        assert!(apply(BinaryOperator::Before, two_days_ago.clone(), Literal::Number(1.0)).unwrap());
        assert!(!apply(BinaryOperator::Before, two_days_ago.clone(), Literal::Number(3.0)).unwrap());
        assert!(!apply(BinaryOperator::Before, Literal::Time(now), Literal::Number(1.0)).unwrap());
    }

    #[test]
    fn test_before_boundary_is_strict() {
        let now = clock().0;
        let exactly_one_day = Literal::Time(now - ChronoDuration::days(1));

        assert!(!apply(BinaryOperator::Before, exactly_one_day, Literal::Number(1.0)).unwrap());
    }

    #[test]
    fn test_before_truncates_fractional_days() {
        let now = clock().0;
        let thirty_hours_ago = Literal::Time(now - ChronoDuration::hours(30));

        // 1.9 days counts as 1 day.
        assert!(apply(BinaryOperator::Before, thirty_hours_ago, Literal::Number(1.9)).unwrap());
    }

    #[test]
    fn test_before_duration() {
        let now = clock().0;
        let ninety_minutes_ago = Literal::Time(now - ChronoDuration::minutes(90));

        assert!(apply(BinaryOperator::Before, ninety_minutes_ago.clone(), Literal::Duration(Duration::from_secs(3600))).unwrap());
        assert!(!apply(BinaryOperator::Before, ninety_minutes_ago, Literal::Duration(Duration::from_secs(7200))).unwrap());
    }

    #[test]
    fn test_before_huge_span_never_elapses() {
        let now = clock().0;
        let long_ago = Literal::Time(now - ChronoDuration::days(365 * 100));

        assert!(!apply(BinaryOperator::Before, long_ago, Literal::Number(1e18)).unwrap());
    }

    #[test]
    fn test_before_type_errors() {
        let now = clock().0;
        assert!(apply(BinaryOperator::Before, Literal::Number(1.0), Literal::Number(1.0)).is_err());
        assert!(apply(BinaryOperator::Before, Literal::Time(now), s("1")).is_err());
    }

    #[test]
    fn test_ereg() {
        assert!(apply(BinaryOperator::Ereg, s("user@example.com"), s(r"@example\.com$")).unwrap());
        assert!(!apply(BinaryOperator::Ereg, s("user@other.org"), s(r"@example\.com$")).unwrap());
        assert!(apply(BinaryOperator::Nereg, s("user@other.org"), s(r"@example\.com$")).unwrap());
    }

    #[test]
    fn test_ereg_invalid_pattern() {
        let err = apply(BinaryOperator::Ereg, s("abc"), s("(")).unwrap_err();
        assert!(matches!(err, EvalError::InvalidPattern { ref pattern, .. } if pattern == "("));

        let err = apply(BinaryOperator::Nereg, s("abc"), s("(")).unwrap_err();
        assert!(matches!(err, EvalError::InvalidPattern { .. }));
    }

    #[test]
    fn test_negated_operators_mirror_their_base() {
        let pairs = [
            (s("a"), s("a")),
            (s("a"), s("b")),
            (Literal::Number(1.0), Literal::Number(2.0)),
            (Literal::TRUE, Literal::FALSE),
            (s("b"), strings(&["a", "b"])),
            (Literal::Number(4.0), Literal::NumberList(vec![1.0])),
            (s("xyz"), s("^x")),
        ];
        let negations = [
            (BinaryOperator::Equal, BinaryOperator::NotEqual),
            (BinaryOperator::In, BinaryOperator::NotIn),
            (BinaryOperator::And, BinaryOperator::Nand),
            (BinaryOperator::Ereg, BinaryOperator::Nereg),
        ];

        for (left, right) in &pairs {
            for (base, negated) in negations {
                let a = apply(base, left.clone(), right.clone());
                let b = apply(negated, left.clone(), right.clone());
                match (a, b) {
                    (Ok(a), Ok(b)) => assert_eq!(a, !b, "{base} vs {negated} on {left} / {right}"),
                    (Err(_), Err(_)) => {}
                    (a, b) => panic!("{base} and {negated} disagree: {a:?} / {b:?}"),
                }
            }
        }
    }
}
