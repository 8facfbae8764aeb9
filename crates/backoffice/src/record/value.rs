//! Raw and coerced record representations.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A row as returned by the server.
pub type Row = IndexMap<String, Value>;

/// A typed record ready for submission, in column order.
pub type CoercedRecord = IndexMap<String, CoercedValue>;

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Serialized as ISO-8601 UTC with millisecond precision.
    Timestamp(DateTime<Utc>),
    Text(String),
    /// An array or object column the operator left untouched, sent back as is.
    Json(Value),
}

impl CoercedValue {
    /// Convert to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            CoercedValue::Null => Value::Null,
            CoercedValue::Bool(b) => Value::Bool(*b),
            CoercedValue::Integer(n) => Value::from(*n),
            CoercedValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CoercedValue::Timestamp(ts) => Value::String(format_timestamp(ts)),
            CoercedValue::Text(s) => Value::String(s.clone()),
            CoercedValue::Json(v) => v.clone(),
        }
    }

    /// Render the value the way an edit field would show it.
    pub fn to_raw_string(&self) -> String {
        match self {
            CoercedValue::Null => String::new(),
            CoercedValue::Bool(b) => b.to_string(),
            CoercedValue::Integer(n) => n.to_string(),
            // Debug keeps a decimal point or exponent, so floats stay floats.
            CoercedValue::Float(f) => format!("{:?}", f),
            CoercedValue::Timestamp(ts) => format_timestamp(ts),
            CoercedValue::Text(s) => s.clone(),
            CoercedValue::Json(v) => v.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CoercedValue::Null)
    }
}

impl Serialize for CoercedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CoercedValue::Null => serializer.serialize_unit(),
            CoercedValue::Bool(b) => serializer.serialize_bool(*b),
            CoercedValue::Integer(n) => serializer.serialize_i64(*n),
            CoercedValue::Float(f) => serializer.serialize_f64(*f),
            CoercedValue::Timestamp(ts) => serializer.serialize_str(&format_timestamp(ts)),
            CoercedValue::Text(s) => serializer.serialize_str(s),
            CoercedValue::Json(v) => v.serialize(serializer),
        }
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Field name to edited string, as typed into an edit form.
///
/// A form built from a server row also remembers the JSON of its array and
/// object columns. Until the operator overwrites such a field, coercion
/// sends that JSON back unchanged instead of its text rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: IndexMap<String, String>,
    structured: IndexMap<String, Value>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an edit form from a server row.
    ///
    /// Nulls become empty strings, strings are kept, and every other value
    /// is rendered as compact JSON text.
    pub fn from_row(row: &Row) -> Self {
        let mut record: Self = row
            .iter()
            .map(|(name, value)| (name.clone(), stringify_value(value)))
            .collect();
        record.structured = row
            .iter()
            .filter(|(_, value)| value.is_array() || value.is_object())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        record
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing any previous value. The field counts as edited.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        self.structured.shift_remove(&name);
        self.fields.insert(name, value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.structured.shift_remove(name);
        self.fields.shift_remove(name)
    }

    /// Server JSON of an untouched array or object field.
    pub fn structured(&self, name: &str) -> Option<&Value> {
        self.structured.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            structured: IndexMap::new(),
        }
    }
}

fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_serialize_values() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let record: CoercedRecord = [
            ("a".to_string(), CoercedValue::Null),
            ("b".to_string(), CoercedValue::Bool(true)),
            ("c".to_string(), CoercedValue::Integer(20)),
            ("d".to_string(), CoercedValue::Float(19.99)),
            ("e".to_string(), CoercedValue::Timestamp(ts)),
            ("f".to_string(), CoercedValue::Text("x".to_string())),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "a": null,
                "b": true,
                "c": 20,
                "d": 19.99,
                "e": "2024-01-15T10:30:00.000Z",
                "f": "x"
            })
        );
    }

    #[test]
    fn test_serialized_order_follows_insertion() {
        let record: CoercedRecord = [
            ("zeta".to_string(), CoercedValue::Integer(1)),
            ("alpha".to_string(), CoercedValue::Integer(2)),
        ]
        .into_iter()
        .collect();

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_from_row_stringifies() {
        let row: Row = serde_json::from_str(
            r#"{"id": 7, "name": "Alice", "balance": 12.5, "isActive": false, "birthday": null}"#,
        )
        .unwrap();

        let raw = RawRecord::from_row(&row);
        assert_eq!(raw.get("id"), Some("7"));
        assert_eq!(raw.get("name"), Some("Alice"));
        assert_eq!(raw.get("balance"), Some("12.5"));
        assert_eq!(raw.get("isActive"), Some("false"));
        assert_eq!(raw.get("birthday"), Some(""));
        let names: Vec<_> = raw.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "name", "balance", "isActive", "birthday"]);
    }

    #[test]
    fn test_from_row_keeps_structured_until_edited() {
        let row: Row =
            serde_json::from_str(r#"{"id": 1, "items": [{"sku": 1}], "meta": {"a": true}}"#)
                .unwrap();

        let mut raw = RawRecord::from_row(&row);
        assert_eq!(raw.get("items"), Some(r#"[{"sku":1}]"#));
        assert_eq!(raw.structured("items"), Some(&json!([{ "sku": 1 }])));
        assert_eq!(raw.structured("id"), None);

        raw.insert("meta", "{}");
        assert_eq!(raw.structured("meta"), None);
        assert!(raw.structured("items").is_some());
    }

    #[test]
    fn test_to_raw_string() {
        assert_eq!(CoercedValue::Null.to_raw_string(), "");
        assert_eq!(CoercedValue::Float(19.99).to_raw_string(), "19.99");
        assert_eq!(CoercedValue::Float(5.0).to_raw_string(), "5.0");
        assert_eq!(CoercedValue::Integer(-3).to_raw_string(), "-3");
        assert_eq!(CoercedValue::Bool(false).to_raw_string(), "false");
    }
}
