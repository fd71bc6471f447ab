//! Scan orchestration.
//!
//! Developer folders are processed sequentially so audit-log writes and
//! collision checks stay race-free within one filesystem namespace.
//! Within a plugin unit, renames run concurrently and every outcome is
//! collected; one failed file never aborts its siblings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use plugvault_core::{
    group_files, CatalogConfig, CatalogError, DeveloperCatalog, PluginUnit, ScanCounts,
    ScanWarning, WarningKind,
};
use plugvault_ops::{validate_name, RenameExecutor};

use crate::categorize::{categorize, plan_renames};
use crate::progress::ScanProgress;
use crate::snapshot::write_snapshot;
use crate::walker::discover;

/// Result of one full catalog pass.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The categorized catalog, developer by developer.
    pub catalog: DeveloperCatalog,
    /// Aggregate counts, including the stopped flag.
    pub counts: ScanCounts,
    /// Every non-fatal problem encountered.
    pub warnings: Vec<ScanWarning>,
    /// Wall-clock duration of the pass.
    pub duration: Duration,
}

/// Drives discovery, grouping, categorization, and renaming.
pub struct CatalogScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl CatalogScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Run one catalog pass over the configured root.
    ///
    /// Cancellation is cooperative: the token is checked once per
    /// developer folder and once per plugin unit, never mid-rename, so
    /// an in-flight rename batch always completes and no unit is left
    /// half-renamed.
    pub async fn scan(
        &self,
        config: &CatalogConfig,
        cancel: CancellationToken,
    ) -> Result<ScanOutcome, CatalogError> {
        let start = Instant::now();
        let (listings, mut warnings) = discover(config)?;

        let executor = Arc::new(if config.dry_run {
            RenameExecutor::dry_run()
        } else {
            RenameExecutor::new()
        });

        let mut catalog = DeveloperCatalog::new();
        let mut counts = ScanCounts::default();
        let mut files_renamed: u64 = 0;

        for listing in listings {
            if cancel.is_cancelled() {
                counts.stopped = true;
                break;
            }

            if let Err(err) = validate_name(&listing.name) {
                warn!(developer = %listing.name, %err, "skipping developer folder");
                warnings.push(ScanWarning::invalid_name(&listing.folder, &err));
                continue;
            }

            let groups = group_files(&listing.name, &listing.files);
            let mut plugins: IndexMap<String, _> = IndexMap::new();

            for (base_name, files) in groups {
                if cancel.is_cancelled() {
                    counts.stopped = true;
                    break;
                }

                if let Err(err) = validate_name(&base_name) {
                    warn!(developer = %listing.name, base = %base_name, %err, "skipping unit");
                    warnings.push(ScanWarning::invalid_name(&listing.folder, &err));
                    continue;
                }

                let unit = PluginUnit::new(base_name.clone(), listing.folder.clone(), files);
                let categorized = categorize(&unit.files);
                let plans = plan_renames(&unit, &categorized, config.rename_images);

                // Fire-and-collect-all: unit members never contend for
                // the same target by construction, and a failure in one
                // file must not abort its siblings.
                let mut batch = JoinSet::new();
                for plan in plans {
                    let executor = Arc::clone(&executor);
                    batch.spawn_blocking(move || {
                        let outcome = executor.rename(&plan.path, &plan.desired_name);
                        (plan.path, outcome)
                    });
                }

                let mut renames: HashMap<PathBuf, PathBuf> = HashMap::new();
                while let Some(joined) = batch.join_next().await {
                    match joined {
                        Ok((old_path, Ok(new_path))) => {
                            if old_path != new_path {
                                files_renamed += 1;
                            }
                            renames.insert(old_path, new_path);
                        }
                        Ok((old_path, Err(err))) => {
                            warn!(path = %old_path.display(), %err, "rename failed");
                            warnings.push(ScanWarning::rename_failed(&old_path, &err));
                        }
                        Err(join_err) => {
                            warnings.push(ScanWarning::new(
                                &listing.folder,
                                format!("rename task failed: {join_err}"),
                                WarningKind::RenameFailed,
                            ));
                        }
                    }
                }

                let categorized = categorized.with_renames(&renames);
                counts.plugins += 1;
                if categorized.zip_file.is_some() {
                    counts.zips += 1;
                }
                plugins.insert(base_name, categorized);
            }

            if !plugins.is_empty() {
                counts.developers += 1;
                catalog.insert(listing.name.clone(), plugins);
            }

            let _ = self.progress_tx.send(ScanProgress {
                developers_scanned: counts.developers,
                plugins_found: counts.plugins,
                zips_found: counts.zips,
                files_renamed,
                warnings_count: warnings.len() as u64,
                current_developer: listing.name,
                elapsed: start.elapsed(),
            });

            if counts.stopped {
                break;
            }
        }

        if !config.dry_run {
            if let Err(err) = write_snapshot(&config.root, &catalog, &counts) {
                warn!(%err, "snapshot write failed");
                warnings.push(ScanWarning::new(
                    &config.root,
                    format!("snapshot write failed: {err}"),
                    WarningKind::SnapshotError,
                ));
            }
        }

        Ok(ScanOutcome {
            catalog,
            counts,
            warnings,
            duration: start.elapsed(),
        })
    }
}

impl Default for CatalogScanner {
    fn default() -> Self {
        Self::new()
    }
}
