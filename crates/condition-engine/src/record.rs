use crate::value::Value;
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    hash::BuildHasher,
};

/// What kind of container a record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Keyed lookup: `$name` reads the entry under key `name`.
    Map,
    /// Field lookup: `$name` reads the field exposed as `name`.
    Struct,
    /// Anything else. Variables cannot be resolved against it.
    Other(&'static str),
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordShape::Map => write!(f, "map"),
            RecordShape::Struct => write!(f, "struct"),
            RecordShape::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// Data that `$variables` are resolved against during evaluation.
///
/// Conditions only ever see a record through this trait, so the expression
/// tree never depends on the concrete type being evaluated. Maps of
/// [`Value`]s and JSON objects work out of the box; structs opt in through
/// [`impl_record!`](crate::impl_record), which names the fields a condition
/// may read.
pub trait Record {
    fn shape(&self) -> RecordShape;

    /// Value stored under `name`, or `None` when there is no such key/field.
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl<R: Record + ?Sized> Record for &R {
    fn shape(&self) -> RecordShape {
        (**self).shape()
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn shape(&self) -> RecordShape {
        RecordShape::Map
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for BTreeMap<String, Value> {
    fn shape(&self) -> RecordShape {
        RecordShape::Map
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for Value {
    fn shape(&self) -> RecordShape {
        match self {
            Value::Map(_) => RecordShape::Map,
            other => RecordShape::Other(other.type_name()),
        }
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        match self {
            Value::Map(map) => map.get(name).cloned(),
            _ => None,
        }
    }
}

impl Record for serde_json::Value {
    fn shape(&self) -> RecordShape {
        match self {
            serde_json::Value::Object(_) => RecordShape::Map,
            serde_json::Value::Null => RecordShape::Other("null"),
            serde_json::Value::Bool(_) => RecordShape::Other("bool"),
            serde_json::Value::Number(_) => RecordShape::Other("number"),
            serde_json::Value::String(_) => RecordShape::Other("string"),
            serde_json::Value::Array(_) => RecordShape::Other("array"),
        }
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.as_object()?.get(name).cloned().map(Value::from)
    }
}

impl Record for str {
    fn shape(&self) -> RecordShape {
        RecordShape::Other("string")
    }

    fn lookup(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl Record for String {
    fn shape(&self) -> RecordShape {
        RecordShape::Other("string")
    }

    fn lookup(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// Implement [`Record`] for a struct by listing the names conditions use and
/// the fields behind them. Field types must be `Clone` and convert into
/// [`Value`].
///
/// ```
/// use condition_engine::impl_record;
///
/// #[derive(Clone)]
/// struct People {
///     name: String,
///     height: i32,
/// }
///
/// impl_record!(People {
///     "Name" => name,
///     "Height" => height,
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($key:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn shape(&self) -> $crate::RecordShape {
                $crate::RecordShape::Struct
            }

            fn lookup(&self, name: &str) -> ::core::option::Option<$crate::Value> {
                match name {
                    $($key => ::core::option::Option::Some($crate::Value::from(self.$field.clone())),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Sensor {
        id: String,
        reading: f64,
        tags: Vec<String>,
    }

    crate::impl_record!(Sensor {
        "Id" => id,
        "Reading" => reading,
        "Tags" => tags,
    });

    #[test]
    fn test_struct_record_lookup() {
        let sensor = Sensor {
            id: "s-1".into(),
            reading: 21.5,
            tags: vec!["lab".into()],
        };

        assert_eq!(sensor.shape(), RecordShape::Struct);
        assert_eq!(sensor.lookup("Id"), Some(Value::String("s-1".into())));
        assert_eq!(sensor.lookup("Reading"), Some(Value::Float(21.5)));
        assert_eq!(sensor.lookup("Tags"), Some(Value::StringArray(vec!["lab".into()])));
        assert_eq!(sensor.lookup("id"), None);
    }

    #[test]
    fn test_map_records() {
        let mut hash = HashMap::new();
        hash.insert("a".to_string(), Value::Int(1));
        let btree: BTreeMap<String, Value> = hash.clone().into_iter().collect();

        assert_eq!(hash.shape(), RecordShape::Map);
        assert_eq!(btree.lookup("a"), Some(Value::Int(1)));
        assert_eq!((&hash).lookup("b"), None);
    }

    #[test]
    fn test_value_records() {
        let map = Value::Map(BTreeMap::from([("a".to_string(), Value::Boolean(true))]));

        assert_eq!(map.shape(), RecordShape::Map);
        assert_eq!(map.lookup("a"), Some(Value::Boolean(true)));
        assert_eq!(Value::Int(3).shape(), RecordShape::Other("int64"));
        assert_eq!(Value::Int(3).lookup("a"), None);
    }

    #[test]
    fn test_json_records() {
        let object = json!({ "Goods": ["A", "B"] });

        assert_eq!(object.shape(), RecordShape::Map);
        assert_eq!(
            object.lookup("Goods"),
            Some(Value::StringArray(vec!["A".into(), "B".into()]))
        );
        assert_eq!(json!("text").shape(), RecordShape::Other("string"));
        assert_eq!(json!([1, 2]).lookup("Goods"), None);
    }

    #[test]
    fn test_strings_are_not_records() {
        assert_eq!("".shape(), RecordShape::Other("string"));
        assert_eq!(String::from("x").lookup("x"), None);
    }
}
