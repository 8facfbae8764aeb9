//! Fuzz target for timestamp parsing.
//!
//! Any string that parses must format and reparse to the same instant.
//! Years outside 0000-9999 have no RFC 3339 form and are skipped.

#![no_main]

use backoffice::record::{format_timestamp, parse_timestamp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Some(ts) = parse_timestamp(text) {
            let formatted = format_timestamp(&ts);
            if formatted.starts_with(['+', '-']) {
                return;
            }
            assert_eq!(parse_timestamp(&formatted), Some(ts));
        }
    }
});
