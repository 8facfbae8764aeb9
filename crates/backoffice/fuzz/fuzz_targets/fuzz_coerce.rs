//! Fuzz target for record coercion.
//!
//! This fuzzer checks that coercion:
//! 1. Never panics on any field name or value
//! 2. Emits one entry per field on create
//! 3. Never emits `id` or `phoneNumber` on update

#![no_main]

use arbitrary::Arbitrary;
use backoffice::record::{RawRecord, coerce_for_create, coerce_for_update};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Form {
    fields: Vec<(String, String)>,
}

fuzz_target!(|form: Form| {
    // Keep forms to a realistic width
    if form.fields.len() > 64 {
        return;
    }

    let raw: RawRecord = form.fields.into_iter().collect();

    let created = coerce_for_create(&raw);
    assert_eq!(created.len(), raw.len());

    let updated = coerce_for_update(&raw);
    assert!(!updated.contains_key("id"));
    assert!(!updated.contains_key("phoneNumber"));

    // Serialization must always succeed
    let _ = serde_json::to_string(&created);
});
