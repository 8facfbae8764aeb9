//! Best-effort type coercion of edited records.
//!
//! Every field is classified once by name (see [`classify`]) and then
//! routed through a single `match`. Rule order for a field `k` with raw
//! value `v` on create:
//!
//! 1. `v` empty and `k` is not the identifier: null
//! 2. timestamp field: parsed date as ISO-8601 UTC, or null when unparseable
//! 3. phone field: `v` unchanged
//! 4. numeric `v`: float when `v` contains `.`, integer otherwise
//! 5. `"true"` / `"false"`: boolean
//! 6. anything else: `v` unchanged
//!
//! Updates drop the identifier and phone fields and skip date parsing
//! unless [`UpdateTimestamps::Reparse`] is selected. Array and object
//! columns of a form built from a server row are sent back untouched
//! unless the operator edited them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldKind, classify};
use super::value::{CoercedRecord, CoercedValue, RawRecord};

/// Date-time layouts with a `+hhmm` offset, which RFC 3339 does not cover.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M%z",
];

/// Date-time layouts accepted without an explicit offset (read as UTC).
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d %Y %H:%M:%S",
    "%B %d %Y %H:%M",
];

/// Date-only layouts (read as UTC midnight). `%B` also accepts `Jan`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// How the update path treats timestamp-like fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateTimestamps {
    /// Treat them like generic fields (no date parsing).
    #[default]
    PassThrough,
    /// Apply the create-path date parsing.
    Reparse,
}

/// Which submission a record is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionMode {
    Create,
    Update,
}

/// Record coercion with a configurable update policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coercer {
    update_timestamps: UpdateTimestamps,
}

impl Coercer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how the update path handles timestamp fields.
    pub fn with_update_timestamps(mut self, policy: UpdateTimestamps) -> Self {
        self.update_timestamps = policy;
        self
    }

    pub fn update_timestamps(&self) -> UpdateTimestamps {
        self.update_timestamps
    }

    /// Coerce a record for a create request.
    pub fn create(&self, raw: &RawRecord) -> CoercedRecord {
        self.coerce(CoercionMode::Create, raw)
    }

    /// Coerce a record for an update request.
    pub fn update(&self, raw: &RawRecord) -> CoercedRecord {
        self.coerce(CoercionMode::Update, raw)
    }

    /// Coerce every field of `raw`, keeping input order.
    pub fn coerce(&self, mode: CoercionMode, raw: &RawRecord) -> CoercedRecord {
        raw.iter()
            .filter_map(|(name, value)| {
                let coerced = match raw.structured(name) {
                    Some(json) => is_submitted(mode, classify(name))
                        .then(|| CoercedValue::Json(json.clone())),
                    None => self.coerce_field(mode, name, value),
                };
                coerced.map(|coerced| (name.to_string(), coerced))
            })
            .collect()
    }

    /// Coerce one field. `None` means the field is left out of the request.
    pub fn coerce_field(&self, mode: CoercionMode, name: &str, value: &str) -> Option<CoercedValue> {
        let kind = classify(name);

        match mode {
            CoercionMode::Create => Some(coerce_create_field(kind, value)),
            CoercionMode::Update => match kind {
                FieldKind::Identifier | FieldKind::Phone => None,
                FieldKind::Timestamp if self.update_timestamps == UpdateTimestamps::Reparse => {
                    Some(coerce_create_field(kind, value))
                }
                FieldKind::Timestamp | FieldKind::Generic => Some(if value.is_empty() {
                    CoercedValue::Null
                } else {
                    coerce_scalar(value)
                }),
            },
        }
    }
}

/// Whether a field of this kind is part of the request body.
fn is_submitted(mode: CoercionMode, kind: FieldKind) -> bool {
    mode == CoercionMode::Create || !matches!(kind, FieldKind::Identifier | FieldKind::Phone)
}

/// Coerce a record for a create request.
pub fn coerce_for_create(raw: &RawRecord) -> CoercedRecord {
    Coercer::new().create(raw)
}

/// Coerce a record for an update request. Never contains `id` or `phoneNumber`.
pub fn coerce_for_update(raw: &RawRecord) -> CoercedRecord {
    Coercer::new().update(raw)
}

fn coerce_create_field(kind: FieldKind, value: &str) -> CoercedValue {
    match kind {
        FieldKind::Identifier => coerce_scalar(value),
        _ if value.is_empty() => CoercedValue::Null,
        FieldKind::Timestamp => parse_timestamp(value)
            .map(CoercedValue::Timestamp)
            .unwrap_or(CoercedValue::Null),
        FieldKind::Phone => CoercedValue::Text(value.to_string()),
        FieldKind::Generic => coerce_scalar(value),
    }
}

/// Rules 4-6: number, boolean, or the original text.
fn coerce_scalar(value: &str) -> CoercedValue {
    if let Some(number) = parse_number(value) {
        return number;
    }

    match value {
        "true" => CoercedValue::Bool(true),
        "false" => CoercedValue::Bool(false),
        _ => CoercedValue::Text(value.to_string()),
    }
}

/// Recognise a finite decimal number.
///
/// Textual specials (`inf`, `NaN`) are rejected. Values without a `.` become
/// integers unless they only fit a float (exponent form, out of `i64` range).
pub fn parse_number(value: &str) -> Option<CoercedValue> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || !trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }

    let number: f64 = trimmed.parse().ok()?;
    if !number.is_finite() {
        return None;
    }

    if value.contains('.') {
        return Some(CoercedValue::Float(number));
    }

    Some(match trimmed.parse::<i64>() {
        Ok(n) => CoercedValue::Integer(n),
        Err(_) => CoercedValue::Float(number),
    })
}

/// Parse a calendar date or date-time, normalized to UTC at millisecond
/// precision.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD[( |T)HH:MM[:SS[.f]]]` without an
/// offset (read as UTC), `YYYY/MM/DD`, and a bare four-digit year.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_any_timestamp(value).map(|ts| ts.trunc_subsecs(3))
}

fn parse_any_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = value.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn create_one(name: &str, value: &str) -> CoercedValue {
        let raw = RawRecord::new().with(name, value);
        coerce_for_create(&raw).shift_remove(name).unwrap()
    }

    #[test]
    fn test_empty_becomes_null_except_identifier() {
        assert_eq!(create_one("name", ""), CoercedValue::Null);
        assert_eq!(create_one("phoneNumber", ""), CoercedValue::Null);
        assert_eq!(create_one("createdAt", ""), CoercedValue::Null);
        assert_eq!(create_one("id", ""), CoercedValue::Text(String::new()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(create_one("price", "19.99"), CoercedValue::Float(19.99));
        assert_eq!(create_one("price", "20"), CoercedValue::Integer(20));
        assert_eq!(create_one("price", " 42 "), CoercedValue::Integer(42));
        assert_eq!(create_one("price", "-7"), CoercedValue::Integer(-7));
        assert_eq!(create_one("price", "20.0"), CoercedValue::Float(20.0));
        assert_eq!(create_one("price", "1e3"), CoercedValue::Float(1000.0));
        assert_eq!(create_one("id", "5"), CoercedValue::Integer(5));
    }

    #[test]
    fn test_non_numbers_stay_text() {
        for value in ["inf", "NaN", "Infinity", "12abc", "1.2.3", ".", "0x1A", " "] {
            assert_eq!(
                create_one("note", value),
                CoercedValue::Text(value.to_string()),
                "value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_booleans_are_exact() {
        assert_eq!(create_one("isActive", "true"), CoercedValue::Bool(true));
        assert_eq!(create_one("isActive", "false"), CoercedValue::Bool(false));
        assert_eq!(create_one("isActive", "True"), CoercedValue::Text("True".to_string()));
        assert_eq!(create_one("isActive", "yes"), CoercedValue::Text("yes".to_string()));
    }

    #[test]
    fn test_phone_is_kept_verbatim() {
        assert_eq!(
            create_one("phoneNumber", "+123456789"),
            CoercedValue::Text("+123456789".to_string())
        );
        assert_eq!(
            create_one("phoneNumber", "5551234"),
            CoercedValue::Text("5551234".to_string())
        );
    }

    #[test]
    fn test_timestamp_date_only() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(create_one("birthday", "2024-01-15"), CoercedValue::Timestamp(expected));
        assert_eq!(create_one("createdAt", "2024/01/15"), CoercedValue::Timestamp(expected));
    }

    #[test]
    fn test_timestamp_with_offset_is_normalized() {
        let value = create_one("updatedAt", "2024-01-15T12:00:00+02:00");
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(value, CoercedValue::Timestamp(expected));
    }

    #[test]
    fn test_timestamp_before_number() {
        // Digits in a timestamp field go through date parsing, not numeric coercion.
        assert_eq!(create_one("createdAt", "1700000000"), CoercedValue::Null);
        let year = create_one("createdAt", "2024");
        match year {
            CoercedValue::Timestamp(ts) => assert_eq!(ts.year(), 2024),
            other => panic!("expected timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_timestamp_is_null() {
        assert_eq!(create_one("createdAt", "not-a-date"), CoercedValue::Null);
        assert_eq!(create_one("birthday", "2024-02-30"), CoercedValue::Null);
        assert_eq!(create_one("status", "shipped"), CoercedValue::Null);
    }

    #[test]
    fn test_update_drops_id_and_phone() {
        let raw = RawRecord::new()
            .with("id", "3")
            .with("phoneNumber", "+1555")
            .with("name", "Bob");
        let out = coerce_for_update(&raw);
        assert!(!out.contains_key("id"));
        assert!(!out.contains_key("phoneNumber"));
        assert_eq!(out.get("name"), Some(&CoercedValue::Text("Bob".to_string())));
    }

    #[test]
    fn test_update_passes_timestamps_through() {
        let raw = RawRecord::new()
            .with("createdAt", "2024-01-15T00:00:00.000Z")
            .with("updatedAt", "");
        let out = coerce_for_update(&raw);
        assert_eq!(
            out.get("createdAt"),
            Some(&CoercedValue::Text("2024-01-15T00:00:00.000Z".to_string()))
        );
        assert_eq!(out.get("updatedAt"), Some(&CoercedValue::Null));
    }

    #[test]
    fn test_update_reparse_policy() {
        let coercer = Coercer::new().with_update_timestamps(UpdateTimestamps::Reparse);
        let raw = RawRecord::new()
            .with("birthday", "2024-01-15")
            .with("createdAt", "garbage");
        let out = coercer.update(&raw);
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(out.get("birthday"), Some(&CoercedValue::Timestamp(expected)));
        assert_eq!(out.get("createdAt"), Some(&CoercedValue::Null));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00.123Z").is_some());
        assert!(parse_timestamp("2024-01-15T10:30").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:45").is_some());
        assert!(parse_timestamp("Mon, 15 Jan 2024 10:30:00 +0000").is_some());
        assert!(parse_timestamp("15/01/2024").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_timestamp_written_dates() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        for value in [
            "01/15/2024",
            "1/15/2024",
            "Jan 15 2024",
            "Jan 15, 2024",
            "January 15, 2024",
            "january 15 2024",
            "15 January 2024",
        ] {
            assert_eq!(parse_timestamp(value), Some(expected), "value {:?}", value);
        }

        let evening = Utc.with_ymd_and_hms(2024, 1, 15, 18, 45, 0).unwrap();
        assert_eq!(parse_timestamp("01/15/2024 18:45"), Some(evening));
        assert_eq!(parse_timestamp("January 15, 2024 18:45"), Some(evening));
    }

    #[test]
    fn test_parse_timestamp_compact_offsets() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15T10:30:00.000+0000"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T12:30:00+0200"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15 05:30-0500"), Some(expected));
    }

    #[test]
    fn test_written_date_in_timestamp_field() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(create_one("createdAt", "01/15/2024"), CoercedValue::Timestamp(expected));
        assert_eq!(create_one("birthday", "Jan 15 2024"), CoercedValue::Timestamp(expected));
    }

    #[test]
    fn test_structured_columns_pass_through() {
        let row: crate::record::Row = serde_json::from_str(
            r#"{"id": 1, "status": "PENDING", "items": [{"sku": 1}], "phoneNumber": "+1"}"#,
        )
        .unwrap();
        let mut raw = RawRecord::from_row(&row);
        raw.insert("status", "COMPLETED");

        let out = coerce_for_update(&raw);
        assert_eq!(out.get("items"), Some(&CoercedValue::Json(serde_json::json!([{ "sku": 1 }]))));
        assert!(!out.contains_key("id"));
        assert!(!out.contains_key("phoneNumber"));

        raw.insert("items", "[]");
        assert_eq!(
            coerce_for_update(&raw).get("items"),
            Some(&CoercedValue::Text("[]".to_string()))
        );
    }
}
