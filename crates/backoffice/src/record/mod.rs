//! Records edited in the table editor and their typed form.

mod coerce;
mod field;
mod value;

pub use coerce::{
    Coercer, CoercionMode, UpdateTimestamps, coerce_for_create, coerce_for_update, parse_number,
    parse_timestamp,
};
pub use field::{
    BIRTHDAY_FIELD, FieldKind, ID_FIELD, InputHint, InputKind, PHONE_FIELD, classify, input_hint,
};
pub use value::{CoercedRecord, CoercedValue, RawRecord, Row, format_timestamp};
