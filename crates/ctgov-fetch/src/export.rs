//! CSV serialization of flattened study records.

use std::path::Path;

use crate::flatten::{FIELD_NAMES, FlatStudyRecord};

/// Format records as CSV with a header row of the twelve field names.
#[must_use]
pub fn to_csv(records: &[FlatStudyRecord]) -> String {
    let mut output = String::new();

    output.push_str(&FIELD_NAMES.join(","));
    output.push('\n');

    for record in records {
        let row = record.values().map(csv_escape);
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Write records as CSV to a file.
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn write_csv(path: &Path, records: &[FlatStudyRecord]) -> std::io::Result<()> {
    std::fs::write(path, to_csv(records))
}

/// Escape a string for CSV output.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        // Prefix with single quote to prevent formula injection in spreadsheets
        let escaped = s.replace('"', "\"\"");
        if escaped.starts_with('=')
            || escaped.starts_with('+')
            || escaped.starts_with('-')
            || escaped.starts_with('@')
        {
            format!("\"'{}\"", escaped)
        } else {
            format!("\"{}\"", escaped)
        }
    } else if s.starts_with('=') || s.starts_with('+') || s.starts_with('-') || s.starts_with('@') {
        // Prevent CSV injection
        format!("'{}", s)
    } else {
        s.to_string()
    }
}
