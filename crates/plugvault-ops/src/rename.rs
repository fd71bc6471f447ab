//! Rename execution.

use std::fs;
use std::path::{Path, PathBuf};

use plugvault_core::CatalogError;
use tracing::{debug, warn};

use crate::audit;
use crate::conflict::{disambiguate_path, is_same_file};

/// Applies computed renames against the filesystem.
///
/// One executor is shared across a scan; it holds no per-file state and
/// can be called from concurrent rename batches.
#[derive(Debug, Default)]
pub struct RenameExecutor {
    /// Compute target paths without performing any filesystem mutation.
    pub dry_run: bool,
}

impl RenameExecutor {
    /// Create an executor that performs renames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor that only reports what it would do.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Rename `old_path` to `desired_name` within its directory.
    ///
    /// Returns the path actually chosen. A file whose basename already
    /// matches is a no-op success. If the desired target exists and is a
    /// different file, a ` (n)` counter suffix is appended until a free
    /// name is found; an existing file is never overwritten.
    pub fn rename(&self, old_path: &Path, desired_name: &str) -> Result<PathBuf, CatalogError> {
        validate_name(desired_name)?;

        let current_name = old_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if current_name == desired_name {
            return Ok(old_path.to_path_buf());
        }

        let parent = old_path.parent().unwrap_or(Path::new(""));
        ensure_writable(parent)?;

        let mut target = parent.join(desired_name);
        if target.exists() && !is_same_file(old_path, &target) {
            target = disambiguate_path(&target);
        }

        if self.dry_run {
            debug!(from = %old_path.display(), to = %target.display(), "dry-run rename");
            return Ok(target);
        }

        fs::rename(old_path, &target).map_err(|e| CatalogError::io(old_path, e))?;
        debug!(from = %current_name, to = %target.display(), "renamed");

        let target_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let entry = format!("Renamed \"{}\" -> \"{}\"", current_name, target_name);
        if let Err(err) = audit::append_entry(parent, &entry) {
            // The rename is already committed; the log is best-effort.
            warn!(directory = %parent.display(), error = %err, "audit log write failed");
        }

        Ok(target)
    }
}

/// Validate a proposed filename before any filesystem access.
///
/// Rejects empty and oversized names, path separators, names outside
/// the accepted character set, and shapes that misbehave on common
/// filesystems (leading/trailing spaces, trailing dots).
pub fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.is_empty() {
        return Err(CatalogError::invalid_name(name, "name is empty"));
    }

    if name.len() > 255 {
        return Err(CatalogError::invalid_name(name, "name is too long"));
    }

    if name == "." || name == ".." {
        return Err(CatalogError::invalid_name(name, "reserved name"));
    }

    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(CatalogError::invalid_name(
            name,
            "name starts or ends with a space",
        ));
    }

    if name.ends_with('.') {
        return Err(CatalogError::invalid_name(name, "name ends with a dot"));
    }

    if let Some(bad) = name.chars().find(|c| !is_accepted_char(*c)) {
        return Err(CatalogError::invalid_name(
            name,
            format!("character '{}' is outside the accepted set", bad.escape_default()),
        ));
    }

    Ok(())
}

fn is_accepted_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            ' ' | '.' | '-' | '_' | '(' | ')' | '[' | ']' | '&' | '+' | ',' | '\'' | '!' | '#'
        )
}

fn ensure_writable(directory: &Path) -> Result<(), CatalogError> {
    let metadata = fs::metadata(directory).map_err(|e| CatalogError::io(directory, e))?;
    if metadata.permissions().readonly() {
        return Err(CatalogError::PermissionDenied {
            path: directory.to_path_buf(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o200 == 0 {
            return Err(CatalogError::PermissionDenied {
                path: directory.to_path_buf(),
            });
        }
    }

    Ok(())
}
