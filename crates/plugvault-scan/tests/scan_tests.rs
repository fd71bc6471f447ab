use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use plugvault_scan::{CatalogConfig, CatalogScanner, SNAPSHOT_FILE_NAME};

fn create_plugin_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("FabFilter")).unwrap();
    fs::write(root.join("FabFilter/FabFilter_ProQ3_v3.21_x64_Setup.exe"), "exe").unwrap();
    fs::write(root.join("FabFilter/FabFilter_ProQ3_v3.21_x64.zip"), "zip").unwrap();
    fs::write(root.join("FabFilter/FabFilter_ProQ3_v3.21_screenshot.png"), "png").unwrap();
    fs::write(root.join("FabFilter/FabFilter - ProQ3 v3.21 manual.pdf"), "pdf").unwrap();

    fs::create_dir(root.join("Waves")).unwrap();
    fs::write(root.join("Waves/Waves - SSLChannel 1.0.zip"), "zip").unwrap();

    temp
}

fn has_file(dir: &Path, name: &str) -> bool {
    dir.join(name).exists()
}

#[tokio::test]
async fn test_full_scan_renames_and_catalogs() {
    let temp = create_plugin_tree();
    let config = CatalogConfig::new(temp.path());

    let outcome = CatalogScanner::new()
        .scan(&config, CancellationToken::new())
        .await
        .unwrap();

    assert!(!outcome.counts.stopped);
    assert_eq!(outcome.counts.developers, 2);
    assert_eq!(outcome.counts.plugins, 2);
    assert_eq!(outcome.counts.zips, 2);

    let fabfilter = temp.path().join("FabFilter");
    assert!(has_file(&fabfilter, "FabFilter - ProQ3 x64 3.21.exe"));
    assert!(has_file(&fabfilter, "FabFilter - ProQ3 x64 3.21.zip"));
    assert!(has_file(&fabfilter, "FabFilter - ProQ3.png"));
    // Documentation is categorized but not renamed.
    assert!(has_file(&fabfilter, "FabFilter - ProQ3 v3.21 manual.pdf"));
    // Renames are recorded in the developer's audit log.
    assert!(has_file(&fabfilter, "_developer_changes.log"));

    // The already-canonical zip is a no-op, so no audit log in Waves.
    let waves = temp.path().join("Waves");
    assert!(has_file(&waves, "Waves - SSLChannel 1.0.zip"));
    assert!(!has_file(&waves, "_developer_changes.log"));

    let proq3 = &outcome.catalog["FabFilter"]["ProQ3"];
    assert!(proq3.zip_file.is_some());
    assert!(proq3.executable_file.is_some());
    assert_eq!(proq3.documentation_files.len(), 1);
    assert_eq!(proq3.image_files.len(), 1);
    assert!(
        proq3.image_files[0].ends_with("FabFilter - ProQ3.png"),
        "catalog should reference the renamed image"
    );
}

#[tokio::test]
async fn test_scan_writes_snapshot() {
    let temp = create_plugin_tree();
    let config = CatalogConfig::new(temp.path());

    CatalogScanner::new()
        .scan(&config, CancellationToken::new())
        .await
        .unwrap();

    let text = fs::read_to_string(temp.path().join(SNAPSHOT_FILE_NAME)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["counts"]["developers"], 2);
    assert!(value["developers"]["FabFilter"]["ProQ3"].is_object());
}

#[tokio::test]
async fn test_dry_run_leaves_tree_untouched() {
    let temp = create_plugin_tree();
    let config = CatalogConfig::builder()
        .root(temp.path())
        .dry_run(true)
        .build()
        .unwrap();

    let outcome = CatalogScanner::new()
        .scan(&config, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.counts.plugins, 2);
    let fabfilter = temp.path().join("FabFilter");
    assert!(has_file(&fabfilter, "FabFilter_ProQ3_v3.21_x64_Setup.exe"));
    assert!(!has_file(&fabfilter, "FabFilter - ProQ3 x64 3.21.exe"));
    assert!(!has_file(&fabfilter, "_developer_changes.log"));
    assert!(!temp.path().join(SNAPSHOT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_cancelled_scan_reports_stopped() {
    let temp = create_plugin_tree();
    let config = CatalogConfig::new(temp.path());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = CatalogScanner::new().scan(&config, cancel).await.unwrap();

    assert!(outcome.counts.stopped);
    assert_eq!(outcome.counts.developers, 0);
    // Nothing was renamed before the first boundary check.
    let fabfilter = temp.path().join("FabFilter");
    assert!(has_file(&fabfilter, "FabFilter_ProQ3_v3.21_x64_Setup.exe"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unwritable_developer_folder_is_isolated() {
    use std::os::unix::fs::PermissionsExt;

    let temp = create_plugin_tree();
    let locked = temp.path().join("FabFilter");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o555);
    fs::set_permissions(&locked, perms).unwrap();

    let config = CatalogConfig::new(temp.path());
    let outcome = CatalogScanner::new()
        .scan(&config, CancellationToken::new())
        .await
        .unwrap();

    // Every rename inside the locked folder fails, the folder's units
    // are still cataloged, and the sibling developer processes normally.
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message.contains("Permission denied")));
    assert!(outcome.catalog.contains_key("Waves"));
    assert!(has_file(&locked, "FabFilter_ProQ3_v3.21_x64_Setup.exe"));

    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&locked, perms).unwrap();
}

#[tokio::test]
async fn test_progress_updates_are_broadcast() {
    let temp = create_plugin_tree();
    let config = CatalogConfig::new(temp.path());

    let scanner = CatalogScanner::new();
    let mut progress_rx = scanner.subscribe();

    scanner.scan(&config, CancellationToken::new()).await.unwrap();

    let mut updates = 0;
    while let Ok(progress) = progress_rx.try_recv() {
        updates += 1;
        assert!(!progress.current_developer.is_empty());
    }
    assert_eq!(updates, 2);
}
