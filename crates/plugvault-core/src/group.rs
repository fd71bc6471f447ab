//! Grouping of loose files into logical plugin units.
//!
//! Two files with the same derived base name belong to one plugin even
//! when their extensions or decorations differ; this is what associates
//! an installer, its zip, screenshots, and a readme into one unit.
//! Grouping is a pure function of filenames, file contents are never
//! inspected.

use std::path::PathBuf;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// First whitespace-bounded version token and everything after it.
/// Decorations that trail a version (`_screenshot`, `_x64_Setup`) are
/// part of the cut.
static VERSION_CUT_RE: LazyLock<Regex> =
    LazyLock::new(|| {
        Regex::new(r"(?i)(^|[\s-]+)v?\d+(\.\d+)*(\s.*)?$").expect("version cut pattern")
    });

/// Trailing platform/installer decoration, stripped iteratively.
static TRAILING_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\s-]+(pc|windows|x64|setup)$").expect("trailing pattern"));

/// Runs of whitespace and hyphens.
static FILLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("filler pattern"));

/// Group a developer folder's files by derived base name.
///
/// Paths whose file names are not valid UTF-8 are skipped. Insertion
/// order of groups and of files within a group follows input order.
pub fn group_files(
    developer_folder_name: &str,
    files: &[PathBuf],
) -> IndexMap<String, Vec<PathBuf>> {
    let prefix_re = developer_prefix_re(developer_folder_name);
    let mut groups: IndexMap<String, Vec<PathBuf>> = IndexMap::new();

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let base = strip_to_base(prefix_re.as_ref(), file_name);
        groups.entry(base).or_default().push(path.clone());
    }

    groups
}

/// Derive the base name a single file would group under.
pub fn derive_base_name(developer_folder_name: &str, file_name: &str) -> String {
    strip_to_base(developer_prefix_re(developer_folder_name).as_ref(), file_name)
}

/// Case-insensitive `"<dev> - "` / `"<dev>_"` / `"<dev> "` leading-prefix
/// pattern. The bare-space form mirrors the parser's developer delimiter,
/// so a file and its canonicalized rename derive the same base.
fn developer_prefix_re(developer_folder_name: &str) -> Option<Regex> {
    if developer_folder_name.is_empty() {
        return None;
    }
    Regex::new(&format!(
        r"(?i)^{}(?:\s*-\s*|_|\s+)",
        regex::escape(developer_folder_name)
    ))
    .ok()
}

fn strip_to_base(prefix_re: Option<&Regex>, file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };

    let mut base = stem.to_owned();
    if let Some(re) = prefix_re {
        base = re.replace(&base, "").into_owned();
    }
    base = base.replace('_', " ");
    base = VERSION_CUT_RE.replace(&base, "").into_owned();

    loop {
        let stripped = TRAILING_TOKEN_RE.replace(&base, "");
        if stripped == base {
            break;
        }
        base = stripped.into_owned();
    }

    FILLER_RE.replace_all(&base, " ").trim().to_owned()
}
