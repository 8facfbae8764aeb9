//! Property-based tests for record coercion.
//!
//! These tests use proptest to generate random field names and values and
//! verify that coercion keeps its invariants for every input:
//!
//! 1. **Totality**: every field yields exactly one output (create) or is
//!    dropped deterministically (update drops `id` and `phoneNumber`)
//! 2. **Determinism**: a field's output depends only on its own name and value
//! 3. **Stability**: re-coercing a restringified record changes nothing
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p backoffice --test property_tests
//! PROPTEST_CASES=10000 cargo test -p backoffice --test property_tests
//! ```

use proptest::prelude::*;

use backoffice::record::{
    CoercedValue, CoercionMode, Coercer, FieldKind, RawRecord, classify, coerce_for_create,
    coerce_for_update,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Field names across every classification.
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("id".to_string()),
        Just("phoneNumber".to_string()),
        Just("birthday".to_string()),
        Just("createdAt".to_string()),
        Just("updatedAt".to_string()),
        "[a-z]{1,12}[A-Z]?[a-z]{0,6}",
    ]
}

/// Values an edit field might hold.
fn field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("true".to_string()),
        Just("false".to_string()),
        "-?[0-9]{1,12}",
        "-?[0-9]{1,6}\\.[0-9]{1,4}",
        "(19|20)[0-9]{2}-(0[1-9]|1[0-2])-(0[1-9]|1[0-9]|2[0-8])",
        "[a-zA-Z0-9 +.:-]{0,24}",
        any::<String>(),
    ]
}

fn record() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((field_name(), field_value()), 0..12)
}

fn to_raw(fields: &[(String, String)]) -> RawRecord {
    fields.iter().cloned().collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_create_is_total(fields in record()) {
        let raw = to_raw(&fields);
        let out = coerce_for_create(&raw);
        prop_assert_eq!(out.len(), raw.len());
        for (name, _) in raw.iter() {
            prop_assert!(out.contains_key(name));
        }
    }

    #[test]
    fn prop_update_never_has_id_or_phone(fields in record()) {
        let raw = to_raw(&fields);
        let out = coerce_for_update(&raw);
        prop_assert!(!out.contains_key("id"));
        prop_assert!(!out.contains_key("phoneNumber"));

        let expected = raw
            .iter()
            .filter(|(name, _)| *name != "id" && *name != "phoneNumber")
            .count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn prop_field_independent_of_neighbours(
        name in field_name(),
        value in field_value(),
        others in record(),
    ) {
        let alone = Coercer::new().coerce_field(CoercionMode::Create, &name, &value);

        let mut raw = to_raw(&others);
        raw.insert(name.clone(), value.clone());
        let out = coerce_for_create(&raw);

        prop_assert_eq!(out.get(&name), alone.as_ref());
    }

    #[test]
    fn prop_empty_non_identifier_is_null(name in field_name()) {
        prop_assume!(name != "id");
        let raw = RawRecord::new().with(name.clone(), "");
        let out = coerce_for_create(&raw);
        prop_assert_eq!(out.get(&name), Some(&CoercedValue::Null));
    }

    #[test]
    fn prop_timestamp_fields_never_numeric(name in field_name(), value in field_value()) {
        prop_assume!(classify(&name) == FieldKind::Timestamp);
        let raw = RawRecord::new().with(name.clone(), value);
        let out = coerce_for_create(&raw);
        let coerced = &out[&name];
        prop_assert!(
            matches!(coerced, CoercedValue::Null | CoercedValue::Timestamp(_)),
            "got {:?}",
            coerced
        );
    }

    #[test]
    fn prop_restringify_is_stable(fields in record()) {
        let first = coerce_for_create(&to_raw(&fields));
        let restrung: RawRecord = first
            .iter()
            .map(|(name, value)| (name.clone(), value.to_raw_string()))
            .collect();
        let second = coerce_for_create(&restrung);

        for (name, value) in &first {
            if let CoercedValue::Text(_) = value {
                // Text such as "1e5" can legitimately re-type once.
                continue;
            }
            prop_assert_eq!(Some(value), second.get(name), "field {}", name);
        }
    }
}
