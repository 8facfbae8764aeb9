//! Field classification derived purely from column names.

use serde::{Deserialize, Serialize};

/// Name of the row identifier column.
pub const ID_FIELD: &str = "id";

/// Name of the phone column, which is never re-typed or updated.
pub const PHONE_FIELD: &str = "phoneNumber";

/// Name of the date-of-birth column (a timestamp without an `at` suffix).
pub const BIRTHDAY_FIELD: &str = "birthday";

/// Columns the server maintains itself.
const READ_ONLY_FIELDS: &[&str] = &[ID_FIELD, "createdAt", "updatedAt"];

/// Coercion class of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// The row identifier (`id`).
    Identifier,
    /// Date/time column (`birthday`, or any name containing `at`).
    Timestamp,
    /// Phone number column (`phoneNumber`).
    Phone,
    /// Everything else.
    Generic,
}

/// Classify a field by name.
///
/// Precedence is Identifier, Timestamp, Phone, Generic. The timestamp test
/// is a case-insensitive substring match on `at`, so names such as `status`
/// or `category` are classified as timestamps too.
pub fn classify(name: &str) -> FieldKind {
    if name == ID_FIELD {
        FieldKind::Identifier
    } else if name == BIRTHDAY_FIELD || name.to_lowercase().contains("at") {
        FieldKind::Timestamp
    } else if name == PHONE_FIELD {
        FieldKind::Phone
    } else {
        FieldKind::Generic
    }
}

/// Kind of input a column expects when filling in a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    Boolean,
    Phone,
}

/// Prompt metadata for one column of the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputHint {
    /// Placeholder shown to the operator.
    pub placeholder: String,
    /// Expected kind of input.
    pub kind: InputKind,
    /// Whether the server fills the column itself.
    pub read_only: bool,
}

/// Derive the input hint for a column name.
pub fn input_hint(column: &str) -> InputHint {
    let (placeholder, kind) = if column == ID_FIELD {
        ("Auto-generated".to_string(), InputKind::Text)
    } else if column.contains("email") {
        ("email@example.com".to_string(), InputKind::Email)
    } else if column.contains("password") {
        ("********".to_string(), InputKind::Password)
    } else if ["price", "amount", "balance"]
        .iter()
        .any(|needle| column.contains(needle))
    {
        ("0.00".to_string(), InputKind::Number)
    } else if column.contains("date") || column.contains("At") {
        ("Leave empty for current date".to_string(), InputKind::Date)
    } else if column.contains("isActive") || column.contains("canPay") {
        ("true or false".to_string(), InputKind::Boolean)
    } else if column == PHONE_FIELD {
        ("+123456789".to_string(), InputKind::Phone)
    } else {
        (format!("Enter {}", column), InputKind::Text)
    };

    InputHint {
        placeholder,
        kind,
        read_only: READ_ONLY_FIELDS.contains(&column),
    }
}
