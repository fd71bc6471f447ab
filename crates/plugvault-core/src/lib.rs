//! Core types and pure naming logic for plugvault.
//!
//! This crate provides the fundamental data structures used throughout
//! the plugvault ecosystem, plus the pure functions that decompose,
//! canonicalize, and group plugin package filenames. Nothing in this
//! crate touches the filesystem.

mod catalog;
mod config;
mod error;
mod group;
mod normalize;
mod parser;

pub use catalog::{
    CategorizedFiles, DeveloperCatalog, FileRole, ParsedFileName, PluginUnit, ScanCounts,
};
pub use config::{CatalogConfig, CatalogConfigBuilder};
pub use error::{CatalogError, ScanWarning, WarningKind};
pub use group::{derive_base_name, group_files};
pub use normalize::normalize;
pub use parser::parse;
