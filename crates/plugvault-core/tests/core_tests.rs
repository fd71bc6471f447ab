use std::path::PathBuf;

use plugvault_core::{derive_base_name, group_files, normalize, parse, ParsedFileName};

#[test]
fn test_scenario_installer_decomposition() {
    // "FabFilter_ProQ3_v3.21_x64_Setup.exe" in developer folder "FabFilter"
    let parsed = parse("FabFilter_ProQ3_v3.21_x64_Setup.exe");

    assert_eq!(
        parsed,
        ParsedFileName {
            developer: "FabFilter".to_string(),
            plugin_name: "ProQ3".to_string(),
            platform: "x64".to_string(),
            version: "3.21".to_string(),
            suffix: "Setup".to_string(),
            extension: ".exe".to_string(),
        }
    );
    assert_eq!(
        normalize(&parsed, "FabFilter"),
        "FabFilter - ProQ3 x64 3.21.exe"
    );
}

#[test]
fn test_scenario_siblings_group_into_one_unit() {
    let files = vec![
        PathBuf::from("/plugins/Waves/Waves - SSLChannel v1.0.vst3"),
        PathBuf::from("/plugins/Waves/Waves_SSLChannel_v1.0_screenshot.png"),
    ];

    let groups = group_files("Waves", &files);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["SSLChannel"], files);
}

#[test]
fn test_normalize_is_idempotent() {
    let canonical = "FabFilter - ProQ3 x64 3.21.exe";
    assert_eq!(normalize(&parse(canonical), "FabFilter"), canonical);
}

#[test]
fn test_normalize_parse_is_stable_after_one_pass() {
    let inputs = [
        "FabFilter_ProQ3_v3.21_x64_Setup.exe",
        "Waves - SSLChannel v1.0.vst3",
        "weird--name__with  gaps_v2_mac.zip",
        "just-a-plugin",
        "v9.99",
        "",
    ];

    for input in inputs {
        let once = normalize(&parse(input), "Vendor");
        let twice = normalize(&parse(&once), "Vendor");
        assert_eq!(once, twice, "second pass diverged for input: {input:?}");
    }
}

#[test]
fn test_parse_is_total() {
    // Never panics, whatever the input.
    let long = "x".repeat(512);
    for input in [
        "",
        ".",
        "..",
        "no_extension",
        "!!!???",
        "____",
        "- - - -",
        "\u{1F3B9}.vst3",
        long.as_str(),
    ] {
        let parsed = parse(input);
        let _ = normalize(&parsed, "Vendor");
    }
}

#[test]
fn test_base_name_derivation_matches_canonical_output() {
    // A file renamed to canonical form must group under the same base
    // name as its raw original, otherwise a rescan would split units.
    // All three developer delimiters the wild uses must agree.
    for raw in [
        "FabFilter_ProQ3_v3.21_x64_Setup.exe",
        "FabFilter ProQ3 v3.21 x64 Setup.exe",
        "FabFilter - ProQ3 v3.21 x64 Setup.exe",
    ] {
        let canonical = normalize(&parse(raw), "FabFilter");

        assert_eq!(
            derive_base_name("FabFilter", raw),
            derive_base_name("FabFilter", &canonical),
            "rescan would split the unit for raw name: {raw}"
        );
    }
}
