//! Catalog scan configuration.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a catalog scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CatalogConfig {
    /// Root folder whose immediate subdirectories are developer folders.
    pub root: PathBuf,

    /// Extension allow-list (lowercase, with leading dot). Files with
    /// other extensions are never considered part of a plugin unit.
    #[builder(default = "default_extensions()")]
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Folder ignore-list: case-sensitive substring match against any
    /// path segment.
    #[builder(default)]
    #[serde(default)]
    pub ignore_folders: Vec<String>,

    /// Rename image files to embed the unit's canonical base name.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub rename_images: bool,

    /// Compute and report rename intents without touching the filesystem.
    #[builder(default = "false")]
    #[serde(default)]
    pub dry_run: bool,

    /// Number of walker threads (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    [
        ".exe", ".msi", ".zip", ".rar", ".dmg", ".pkg", ".iso", ".dll", ".vst3", ".component",
        ".md", ".pdf", ".txt", ".png", ".jpg", ".jpeg", ".gif", ".webp",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl CatalogConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl CatalogConfig {
    /// Create a new config builder.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Create a simple config for scanning a root folder with defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            allowed_extensions: default_extensions(),
            ignore_folders: Vec::new(),
            rename_images: true,
            dry_run: false,
            threads: 0,
        }
    }

    /// Check whether a lowercase dotted extension passes the allow-list.
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }

    /// Check whether any segment of the path matches the ignore-list.
    ///
    /// Matching is a case-sensitive substring test, per segment.
    pub fn should_ignore(&self, path: &Path) -> bool {
        self.ignore_folders.iter().any(|pattern| {
            path.iter()
                .any(|segment| segment.to_string_lossy().contains(pattern.as_str()))
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
