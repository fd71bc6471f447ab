//! Scan progress reporting.

use std::time::Duration;

/// Progress information during a catalog scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Developer folders fully processed so far.
    pub developers_scanned: u64,
    /// Plugin units recorded so far.
    pub plugins_found: u64,
    /// Zip archives seen so far.
    pub zips_found: u64,
    /// Files whose rename actually changed their path.
    pub files_renamed: u64,
    /// Warnings collected so far.
    pub warnings_count: u64,
    /// Developer folder currently being processed.
    pub current_developer: String,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            developers_scanned: 0,
            plugins_found: 0,
            zips_found: 0,
            files_renamed: 0,
            warnings_count: 0,
            current_developer: String::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Developer folders processed per second.
    pub fn developers_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.developers_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}
