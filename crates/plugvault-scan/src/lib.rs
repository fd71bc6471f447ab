//! Discovery and scan orchestration for plugvault.
//!
//! This crate drives the full catalog pass: walk the scan root for
//! developer folders, group each folder's files into plugin units,
//! categorize and rename them, and aggregate the results.
//!
//! # Overview
//!
//! - **Discovery** via jwalk (parallel, deterministic order)
//! - **Progress updates** via broadcast channels
//! - **Cooperative cancellation** checked at folder and unit boundaries
//! - **Per-unit rename batches** that collect every outcome instead of
//!   failing fast
//!
//! # Example
//!
//! ```rust,no_run
//! use plugvault_scan::{CatalogConfig, CatalogScanner};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() {
//! let config = CatalogConfig::new("/path/to/plugins");
//! let scanner = CatalogScanner::new();
//! let outcome = scanner.scan(&config, CancellationToken::new()).await.unwrap();
//!
//! println!("{} developers, {} plugins", outcome.counts.developers, outcome.counts.plugins);
//! # }
//! ```

mod categorize;
mod orchestrator;
mod progress;
mod snapshot;
mod walker;

pub use categorize::{categorize, plan_renames, RenamePlan};
pub use orchestrator::{CatalogScanner, ScanOutcome};
pub use progress::ScanProgress;
pub use snapshot::{write_snapshot, SNAPSHOT_FILE_NAME};
pub use walker::{discover, DeveloperListing};

// Re-export core types for convenience
pub use plugvault_core::{
    CatalogConfig, CatalogError, CategorizedFiles, DeveloperCatalog, ScanCounts, ScanWarning,
    WarningKind,
};
