//! Filesystem rename engine for plugvault.
//!
//! This crate is the only part of the engine that mutates the
//! filesystem. Renames are collision-safe (existing files are never
//! overwritten), permission failures are signaled explicitly, and every
//! committed rename is recorded in a per-folder audit log on a
//! best-effort basis.

mod audit;
mod conflict;
mod rename;

pub use audit::{append_entry, AUDIT_LOG_NAME};
pub use conflict::{disambiguate_path, is_same_file};
pub use rename::{validate_name, RenameExecutor};
