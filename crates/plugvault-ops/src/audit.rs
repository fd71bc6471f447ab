//! Per-folder append-only change log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{SecondsFormat, Utc};

/// File name of the audit log kept in each developer folder.
pub const AUDIT_LOG_NAME: &str = "_developer_changes.log";

/// Append one timestamped line to the folder's audit log.
///
/// Line format: `[<RFC 3339 UTC>] <entry>`. The log is human-readable
/// only and never parsed back.
pub fn append_entry(directory: &Path, entry: &str) -> std::io::Result<()> {
    let line = format!(
        "[{}] {}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        entry
    );

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(directory.join(AUDIT_LOG_NAME))?;
    file.write_all(line.as_bytes())
}
