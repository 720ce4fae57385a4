use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// A fully resolved value of one fixed kind.
///
/// Literals appear as leaves of a parsed [`Expression`](super::Expression)
/// and are also what the evaluator reduces every node to. `Time` never comes
/// out of the parser; it only exists once a variable has been resolved
/// against a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Boolean(bool),
    Number(f64),
    String(String),
    Time(DateTime<Utc>),
    Duration(Duration),
    StringList(Vec<String>),
    NumberList(Vec<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Boolean,
    Number,
    String,
    Time,
    Duration,
    StringList,
    NumberList,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Boolean => "boolean",
            LiteralKind::Number => "number",
            LiteralKind::String => "string",
            LiteralKind::Time => "time",
            LiteralKind::Duration => "duration",
            LiteralKind::StringList => "slice of string",
            LiteralKind::NumberList => "slice of number",
        };
        f.write_str(name)
    }
}

impl Literal {
    pub const TRUE: Literal = Literal::Boolean(true);
    pub const FALSE: Literal = Literal::Boolean(false);

    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Boolean(_) => LiteralKind::Boolean,
            Literal::Number(_) => LiteralKind::Number,
            Literal::String(_) => LiteralKind::String,
            Literal::Time(_) => LiteralKind::Time,
            Literal::Duration(_) => LiteralKind::Duration,
            Literal::StringList(_) => LiteralKind::StringList,
            Literal::NumberList(_) => LiteralKind::NumberList,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write_quoted(f, s),
            Literal::Time(t) => write_quoted(f, &t.to_rfc3339()),
            Literal::Duration(d) if d.subsec_nanos() % 1_000_000 != 0 => {
                write!(f, "{}s", d.as_secs_f64())
            }
            Literal::Duration(d) if d.subsec_millis() != 0 => write!(f, "{}ms", d.as_millis()),
            Literal::Duration(d) => write!(f, "{}s", d.as_secs()),
            Literal::StringList(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, item)?;
                }
                f.write_str("]")
            }
            Literal::NumberList(items) => {
                let joined = items
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", joined)
            }
        }
    }
}
