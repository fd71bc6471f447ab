//! Collision-safe target path selection.

use std::fs;
use std::path::{Path, PathBuf};

/// Pick a free sibling path for a taken target.
///
/// For "file.txt", tries "file (1).txt", "file (2).txt", and so on,
/// falling back to a unix-timestamp suffix if the counter runs out.
/// The returned path did not exist at the time of the call.
pub fn disambiguate_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new(""));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let extension = path.extension().and_then(|e| e.to_str());

    for i in 1..1000 {
        let candidate_name = if let Some(ext) = extension {
            format!("{} ({}).{}", stem, i, ext)
        } else {
            format!("{} ({})", stem, i)
        };

        let candidate = parent.join(&candidate_name);
        if !candidate.exists() {
            return candidate;
        }
    }

    let timestamp = chrono::Utc::now().timestamp();
    let fallback_name = if let Some(ext) = extension {
        format!("{}_{}.{}", stem, timestamp, ext)
    } else {
        format!("{}_{}", stem, timestamp)
    };

    parent.join(&fallback_name)
}

/// Check whether two paths refer to the same filesystem object.
///
/// False when either path cannot be resolved.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
