//! JWalk-based discovery of developer folders and their files.

use std::path::PathBuf;

use jwalk::{Parallelism, WalkDir};

use plugvault_core::{CatalogConfig, CatalogError, ScanWarning, WarningKind};
use plugvault_ops::AUDIT_LOG_NAME;

use crate::snapshot::SNAPSHOT_FILE_NAME;

/// One developer folder and the candidate files directly inside it.
#[derive(Debug, Clone)]
pub struct DeveloperListing {
    /// Absolute path of the developer folder.
    pub folder: PathBuf,
    /// Folder name; the authoritative developer token.
    pub name: String,
    /// Candidate files, filtered by the extension allow-list.
    pub files: Vec<PathBuf>,
}

/// Walk the scan root and collect per-developer file listings.
///
/// Only the immediate subdirectories of the root count as developer
/// folders, and only their direct children count as candidate files
/// (a plugin unit's members always share one parent directory).
/// Unreadable entries become warnings; a missing or unreadable root is
/// the only fatal condition.
pub fn discover(
    config: &CatalogConfig,
) -> Result<(Vec<DeveloperListing>, Vec<ScanWarning>), CatalogError> {
    let root = config
        .root
        .canonicalize()
        .map_err(|e| CatalogError::io(&config.root, e))?;
    if !root.is_dir() {
        return Err(CatalogError::NotADirectory { path: root });
    }

    let parallelism = match config.threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: std::time::Duration::from_millis(100),
        },
        n => Parallelism::RayonNewPool(n),
    };

    let walker = WalkDir::new(&root)
        .parallelism(parallelism)
        .sort(true)
        .skip_hidden(true)
        .follow_links(false)
        .min_depth(1)
        .max_depth(2);

    let mut listings: Vec<DeveloperListing> = Vec::new();
    let mut warnings = Vec::new();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                warnings.push(ScanWarning::new(path, err.to_string(), WarningKind::ReadError));
                continue;
            }
        };

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().to_string();

        if config.should_ignore(&path) {
            continue;
        }

        if entry.depth() == 1 {
            if entry.file_type().is_dir() && !file_name.starts_with('_') {
                listings.push(DeveloperListing {
                    folder: path,
                    name: file_name,
                    files: Vec::new(),
                });
            }
        } else if entry.file_type().is_file() {
            if file_name == AUDIT_LOG_NAME || file_name == SNAPSHOT_FILE_NAME {
                continue;
            }
            if !config.is_allowed_extension(&extension_of(&file_name)) {
                continue;
            }
            let Some(parent) = path.parent() else { continue };
            if let Some(listing) = listings.iter_mut().find(|l| l.folder == parent) {
                listing.files.push(path);
            }
        }
    }

    Ok((listings, warnings))
}

/// Lowercase dotted extension of a filename, or empty.
pub(crate) fn extension_of(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[idx..].to_lowercase(),
        _ => String::new(),
    }
}
