use chrono::{DateTime, Utc};
use condition_syntax::Literal;
use std::{collections::BTreeMap, fmt, time::Duration};

/// A dynamically typed value held by a record.
///
/// This is the shape values have before the evaluator classifies them into a
/// [`Literal`]. It is deliberately wider than `Literal`: hosts can store
/// anything they like, and kinds the evaluator cannot use (`Null`, `Bytes`,
/// nested maps, mixed arrays) are rejected only when a condition actually
/// refers to them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Int32(i32),
    Uint(u64),
    Float(f64),
    Float32(f32),
    String(String),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Duration(Duration),
    StringArray(Vec<String>),
    NumberArray(Vec<f64>),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Null,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int64",
            Value::Int32(_) => "int32",
            Value::Uint(_) => "uint64",
            Value::Float(_) => "float64",
            Value::Float32(_) => "float32",
            Value::String(_) => "string",
            Value::Boolean(_) => "bool",
            Value::Timestamp(_) => "timestamp",
            Value::Duration(_) => "duration",
            Value::StringArray(_) => "[]string",
            Value::NumberArray(_) => "[]number",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Null => "null",
        }
    }

    /// Classify into the literal kind the evaluator works with. Integer and
    /// float kinds all widen to `Number`.
    pub fn to_literal(&self) -> Option<Literal> {
        Some(match self {
            Value::Timestamp(t) => Literal::Time(*t),
            Value::Int(v) => Literal::Number(*v as f64),
            Value::Int32(v) => Literal::Number(f64::from(*v)),
            Value::Uint(v) => Literal::Number(*v as f64),
            Value::Float(v) => Literal::Number(*v),
            Value::Float32(v) => Literal::Number(f64::from(*v)),
            Value::String(s) => Literal::String(s.clone()),
            Value::Boolean(b) => Literal::Boolean(*b),
            Value::StringArray(items) => Literal::StringList(items.clone()),
            Value::NumberArray(items) => Literal::NumberList(items.clone()),
            Value::Duration(d) => Literal::Duration(*d),
            Value::Bytes(_) | Value::Array(_) | Value::Map(_) | Value::Null => return None,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Duration(v) => write!(f, "{v:?}"),
            Value::StringArray(v) => write!(f, "{v:?}"),
            Value::NumberArray(v) => write!(f, "{v:?}"),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Array(v) => {
                let items = v.iter().map(|item| item.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Map(v) => {
                let entries = v
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", entries.join(", "))
            }
            Value::Null => write!(f, "null"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    i64 => Int,
    i32 => Int32,
    u64 => Uint,
    f64 => Float,
    f32 => Float32,
    String => String,
    bool => Boolean,
    DateTime<Utc> => Timestamp,
    Duration => Duration,
    Vec<String> => StringArray,
    Vec<f64> => NumberArray,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
    BTreeMap<String, Value> => Map,
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Uint(u64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::StringArray(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::NumberArray(value.into_iter().map(|v| v as f64).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    /// Homogeneous string or number arrays become `StringArray` and
    /// `NumberArray`; anything else stays a generic `Array`.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                if items.iter().all(serde_json::Value::is_string) {
                    Value::StringArray(
                        items
                            .into_iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect(),
                    )
                } else if items.iter().all(serde_json::Value::is_number) {
                    Value::NumberArray(items.iter().filter_map(serde_json::Value::as_f64).collect())
                } else {
                    Value::Array(items.into_iter().map(Value::from).collect())
                }
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
