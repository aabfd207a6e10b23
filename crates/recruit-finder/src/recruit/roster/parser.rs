use serde::Deserialize;
use serde_json::Value;
use std::io::Read;

use super::RosterError;

/// Lenient mirror of one dataset record; every field is checked during normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawOperator {
    #[serde(default)]
    pub(crate) id: Value,
    #[serde(default)]
    pub(crate) name: Value,
    #[serde(default)]
    pub(crate) rarity: Value,
    #[serde(default, rename = "type")]
    pub(crate) operator_type: Value,
    #[serde(default)]
    pub(crate) tags: Value,
    #[serde(default)]
    pub(crate) add_day: Value,
    #[serde(default)]
    pub(crate) wiki: Value,
    #[serde(default)]
    pub(crate) img_path: Value,
}

/// Parsed record, or the reason it could not be read as an object.
pub(crate) type RawRecord = Result<RawOperator, serde_json::Error>;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, RosterError> {
    let document: Value = serde_json::from_reader(reader)?;
    let Value::Array(entries) = document else {
        return Err(RosterError::NotAnArray);
    };

    Ok(entries
        .into_iter()
        .map(serde_json::from_value::<RawOperator>)
        .collect())
}

pub(crate) fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_null() {
        let records = parse_records(r#"[{"id": 3, "name": "Ansel"}]"#.as_bytes()).expect("parse");
        let record = records.into_iter().next().expect("one record").expect("object");
        assert_eq!(record.id, Value::from(3));
        assert!(record.tags.is_null());
        assert!(record.operator_type.is_null());
    }

    #[test]
    fn non_object_entries_fail_individually() {
        let records = parse_records(r#"[{"id": 1}, 42]"#.as_bytes()).expect("parse");
        assert_eq!(records.len(), 2);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
    }

    #[test]
    fn top_level_object_is_rejected() {
        let err = parse_records(r#"{"id": 1}"#.as_bytes()).expect_err("object rejected");
        assert!(matches!(err, RosterError::NotAnArray));
    }
}
