use crate::error::CliError;
use chrono::{DateTime, Utc};
use condition_engine::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Load the record for `eval` from a file, inline JSON, or nothing at all
/// (an empty map).
pub fn load(
    path: Option<&str>,
    inline: Option<&str>,
    parse_timestamps: bool,
) -> Result<Value, CliError> {
    let source = match (path, inline) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(inline)) => inline.to_string(),
        (None, None) => return Ok(Value::Map(BTreeMap::new())),
    };

    let json: serde_json::Value = serde_json::from_str(&source)?;
    let mut record = Value::from(json);

    if parse_timestamps {
        promote_timestamps(&mut record);
    }

    debug!(record = %record, "Loaded record");
    Ok(record)
}

/// Rewrite top-level RFC 3339 strings as timestamps.
fn promote_timestamps(record: &mut Value) {
    let Value::Map(fields) = record else {
        return;
    };

    for value in fields.values_mut() {
        if let Value::String(text) = value {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                *value = Value::Timestamp(parsed.with_timezone(&Utc));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_missing_record_is_empty_map() {
        let record = load(None, None, false).unwrap();
        assert_eq!(record, Value::Map(BTreeMap::new()));
    }

    #[test]
    fn test_inline_record() {
        let record = load(None, Some(r#"{"Height": 180, "Name": "test"}"#), false).unwrap();

        let Value::Map(fields) = record else {
            panic!("Expected a map record");
        };
        assert_eq!(fields["Height"], Value::Int(180));
        assert_eq!(fields["Name"], Value::String("test".into()));
    }

    #[test]
    fn test_timestamps_are_promoted_on_request() {
        let inline = r#"{"Birth": "2024-03-10T08:30:00Z", "Name": "test"}"#;

        let Value::Map(plain) = load(None, Some(inline), false).unwrap() else {
            panic!("Expected a map record");
        };
        assert_eq!(plain["Birth"], Value::String("2024-03-10T08:30:00Z".into()));

        let Value::Map(promoted) = load(None, Some(inline), true).unwrap() else {
            panic!("Expected a map record");
        };
        assert_eq!(
            promoted["Birth"],
            Value::Timestamp(Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap())
        );
        assert_eq!(promoted["Name"], Value::String("test".into()));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            load(None, Some("{not json"), false),
            Err(CliError::RecordParse(_))
        ));
    }
}
