//! Persisted scan snapshot.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use plugvault_core::{CatalogError, DeveloperCatalog, ScanCounts};

/// Fixed snapshot filename, written into the scan root after each pass.
pub const SNAPSHOT_FILE_NAME: &str = "_plugin_catalog.json";

#[derive(Serialize)]
struct Snapshot<'a> {
    generated_at: String,
    counts: &'a ScanCounts,
    developers: &'a DeveloperCatalog,
}

/// Write the catalog snapshot for external indexing collaborators.
pub fn write_snapshot(
    root: &Path,
    catalog: &DeveloperCatalog,
    counts: &ScanCounts,
) -> Result<(), CatalogError> {
    let path = root.join(SNAPSHOT_FILE_NAME);
    let file = File::create(&path).map_err(|e| CatalogError::io(&path, e))?;

    let snapshot = Snapshot {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        counts,
        developers: catalog,
    };

    serde_json::to_writer_pretty(BufWriter::new(file), &snapshot)
        .map_err(|e| CatalogError::io(&path, e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use plugvault_core::CategorizedFiles;
    use tempfile::TempDir;

    #[test]
    fn test_write_snapshot() {
        let temp = TempDir::new().unwrap();

        let mut plugins = IndexMap::new();
        plugins.insert("ProQ3".to_string(), CategorizedFiles::default());
        let mut catalog = DeveloperCatalog::new();
        catalog.insert("FabFilter".to_string(), plugins);

        let counts = ScanCounts {
            developers: 1,
            plugins: 1,
            zips: 0,
            stopped: false,
        };

        write_snapshot(temp.path(), &catalog, &counts).unwrap();

        let text = std::fs::read_to_string(temp.path().join(SNAPSHOT_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["counts"]["plugins"], 1);
        assert!(value["developers"]["FabFilter"]["ProQ3"].is_object());
        assert!(value["generated_at"].is_string());
    }
}
