//! plugvault - catalogs and renames loosely-named audio plugin packages.
//!
//! Usage:
//!   plugvault scan [PATH]        Scan, rename, and catalog a plugin folder
//!   plugvault parse NAME         Show how a single filename decomposes
//!   plugvault --help             Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tokio_util::sync::CancellationToken;

use plugvault_core::{normalize, parse, CatalogConfig};
use plugvault_scan::CatalogScanner;

#[derive(Parser)]
#[command(
    name = "plugvault",
    version,
    about = "Catalogs and renames loosely-named audio plugin packages",
    long_about = "plugvault walks a folder of developer subfolders, renames plugin\n\
                  packages into the \"Developer - Plugin [Platform] [Version].ext\"\n\
                  convention, and writes a catalog snapshot for indexing."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a plugin folder, rename packages, write the catalog snapshot
    Scan {
        /// Root folder whose subfolders are developer folders
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Compute renames without touching the filesystem
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Leave image files unrenamed
        #[arg(long)]
        keep_image_names: bool,

        /// Folder name substrings to ignore (case-sensitive, repeatable)
        #[arg(short, long)]
        ignore: Vec<String>,

        /// Number of walker threads (0 = auto-detect)
        #[arg(short, long, default_value = "0")]
        threads: usize,
    },

    /// Show how a single filename decomposes and what it canonicalizes to
    Parse {
        /// Filename to decompose
        name: String,

        /// Developer folder name to canonicalize against
        #[arg(short, long)]
        developer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            dry_run,
            keep_image_names,
            ignore,
            threads,
        } => run_scan(path, dry_run, keep_image_names, ignore, threads).await,
        Command::Parse { name, developer } => run_parse(&name, developer.as_deref()),
    }
}

/// Run a full catalog pass, cancelled cooperatively on Ctrl-C.
async fn run_scan(
    path: PathBuf,
    dry_run: bool,
    keep_image_names: bool,
    ignore: Vec<String>,
    threads: usize,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    let config = CatalogConfig::builder()
        .root(&path)
        .dry_run(dry_run)
        .rename_images(!keep_image_names)
        .ignore_folders(ignore)
        .threads(threads)
        .build()
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nStopping after the current plugin unit...");
            ctrl_c_cancel.cancel();
        }
    });

    let scanner = CatalogScanner::new();
    let mut progress_rx = scanner.subscribe();
    tokio::spawn(async move {
        while let Ok(progress) = progress_rx.recv().await {
            eprintln!(
                "  {} ({} plugins, {} renamed, {:.1} dev/s)",
                progress.current_developer,
                progress.plugins_found,
                progress.files_renamed,
                progress.developers_per_second()
            );
        }
    });

    eprintln!(
        "{} {}...",
        if dry_run { "Previewing" } else { "Scanning" },
        path.display()
    );
    let outcome = scanner.scan(&config, cancel).await.context("Scan failed")?;

    println!();
    println!("{}", "─".repeat(60));
    println!(
        " {} developers, {} plugins, {} zips",
        outcome.counts.developers, outcome.counts.plugins, outcome.counts.zips
    );
    println!(
        " Finished in {:.2}s{}",
        outcome.duration.as_secs_f64(),
        if outcome.counts.stopped {
            " (stopped early)"
        } else {
            ""
        }
    );
    println!("{}", "─".repeat(60));

    if !outcome.warnings.is_empty() {
        println!();
        println!("{} warning(s):", outcome.warnings.len());
        for warning in &outcome.warnings {
            println!("  {}: {}", warning.path.display(), warning.message);
        }
    }

    Ok(())
}

/// Decompose one filename and print the fields and canonical form.
fn run_parse(name: &str, developer: Option<&str>) -> Result<()> {
    let parsed = parse(name);

    println!("developer: {:?}", parsed.developer);
    println!("plugin:    {:?}", parsed.plugin_name);
    println!("platform:  {:?}", parsed.platform);
    println!("version:   {:?}", parsed.version);
    println!("suffix:    {:?}", parsed.suffix);
    println!("extension: {:?}", parsed.extension);

    let folder = developer.unwrap_or(if parsed.developer.is_empty() {
        "Developer"
    } else {
        parsed.developer.as_str()
    });
    println!("canonical: {:?}", normalize(&parsed, folder));

    Ok(())
}
