//! Coerce command - show typed values offline.

use backoffice::RawRecord;
use backoffice::record::{Coercer, UpdateTimestamps};

use super::print_record;

pub fn run(
    fields: Vec<(String, String)>,
    update: bool,
    reparse_timestamps: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw: RawRecord = fields.into_iter().collect();

    let record = if update {
        let policy = if reparse_timestamps {
            UpdateTimestamps::Reparse
        } else {
            UpdateTimestamps::PassThrough
        };
        Coercer::new().with_update_timestamps(policy).update(&raw)
    } else {
        Coercer::new().create(&raw)
    };

    print_record(&record)
}
