//! Catalog data model: parsed names, plugin units, categorized file sets.

use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Structured fields recovered from a free-form package filename.
///
/// All fields except `extension` use the empty string for absence.
/// `extension` is always lowercase and includes the leading dot, or is
/// empty when the source filename had no extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFileName {
    /// Vendor token stripped from the front of the filename.
    pub developer: String,
    /// What remains after every other field has been stripped.
    pub plugin_name: String,
    /// Platform token (`x64`, `win`, `mac`, ...), original case.
    pub platform: String,
    /// Version digits without the `v` prefix (`3.21`, `1.0.2`).
    pub version: String,
    /// Installer-style suffix token (`Setup`, `Installer`, `Full`).
    pub suffix: String,
    /// Lowercase extension with leading dot, or empty.
    pub extension: String,
}

/// One logical plugin inside a developer folder: the set of sibling
/// files that share a derived base name.
///
/// Recomputed from a fresh listing on every scan pass; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginUnit {
    /// Derived base name shared by all member files.
    pub base_name: String,
    /// The developer folder every member file lives in.
    pub developer_folder: PathBuf,
    /// Member file paths, in discovery order.
    pub files: Vec<PathBuf>,
}

impl PluginUnit {
    /// Create a new plugin unit.
    pub fn new(base_name: String, developer_folder: PathBuf, files: Vec<PathBuf>) -> Self {
        Self {
            base_name,
            developer_folder,
            files,
        }
    }

    /// Name of the developer folder, used as the authoritative developer
    /// token when canonicalizing member filenames.
    pub fn developer_name(&self) -> String {
        self.developer_folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Role assigned to a file by the fixed extension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileRole {
    /// `.zip` archive.
    Archive,
    /// `.exe` / `.msi` installer.
    Installer,
    /// `.md` / `.pdf` / `.txt` documentation.
    Documentation,
    /// `.png` / `.jpg` / `.jpeg` / `.gif` / `.webp` image.
    Image,
    /// Anything else.
    Other,
}

impl FileRole {
    /// Map a lowercase dotted extension to its role.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            ".zip" => Self::Archive,
            ".exe" | ".msi" => Self::Installer,
            ".md" | ".pdf" | ".txt" => Self::Documentation,
            ".png" | ".jpg" | ".jpeg" | ".gif" | ".webp" => Self::Image,
            _ => Self::Other,
        }
    }
}

/// A plugin unit's file set classified into roles.
///
/// Every input path lands in exactly one slot; the union of all slots
/// equals the input set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedFiles {
    /// The unit's archive, if any (first `.zip` encountered).
    pub zip_file: Option<PathBuf>,
    /// The unit's installer, if any (first `.exe`/`.msi` encountered).
    pub executable_file: Option<PathBuf>,
    /// Documentation files, in input order.
    pub documentation_files: Vec<PathBuf>,
    /// Image files, in input order.
    pub image_files: Vec<PathBuf>,
    /// Everything else, in input order.
    pub other_files: Vec<PathBuf>,
}

impl CategorizedFiles {
    /// Total number of files across all slots.
    pub fn file_count(&self) -> usize {
        usize::from(self.zip_file.is_some())
            + usize::from(self.executable_file.is_some())
            + self.documentation_files.len()
            + self.image_files.len()
            + self.other_files.len()
    }

    /// Iterate over every file in the set, slot by slot.
    pub fn all_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.zip_file
            .iter()
            .chain(self.executable_file.iter())
            .chain(self.documentation_files.iter())
            .chain(self.image_files.iter())
            .chain(self.other_files.iter())
    }

    /// Rewrite member paths through a rename map (old path -> new path).
    ///
    /// Paths absent from the map are kept as-is, so a partially failed
    /// rename batch still yields a usable record.
    pub fn with_renames(mut self, renames: &HashMap<PathBuf, PathBuf>) -> Self {
        let remap = |path: PathBuf| renames.get(&path).cloned().unwrap_or(path);
        self.zip_file = self.zip_file.map(remap);
        self.executable_file = self.executable_file.map(remap);
        for slot in [
            &mut self.documentation_files,
            &mut self.image_files,
            &mut self.other_files,
        ] {
            for path in slot.iter_mut() {
                if let Some(new_path) = renames.get(path) {
                    *path = new_path.clone();
                }
            }
        }
        self
    }
}

/// Mapping from developer-folder name to plugin base name to its
/// categorized files. Insertion order follows discovery order; sorting
/// is left to presentation layers.
pub type DeveloperCatalog = IndexMap<String, IndexMap<String, CategorizedFiles>>;

/// Aggregate counts for one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCounts {
    /// Developer folders that produced at least one plugin unit.
    pub developers: u64,
    /// Plugin units recorded in the catalog.
    pub plugins: u64,
    /// Plugin units that carry a zip archive.
    pub zips: u64,
    /// True when the scan was cancelled before completing.
    pub stopped: bool,
}
