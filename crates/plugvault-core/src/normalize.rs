//! Canonical name reconstruction.

use crate::catalog::ParsedFileName;

/// Rebuild the canonical filename for a parsed name.
///
/// The form is `"<developer_folder> - <plugin>[ <platform>][ <version>]<ext>"`.
/// The developer token always comes from the folder name; the parsed
/// developer field only exists so parsing can strip it as noise. The
/// suffix is intentionally dropped from the canonical form.
///
/// Normalizing an already-canonical name reproduces it byte for byte.
pub fn normalize(parsed: &ParsedFileName, developer_folder: &str) -> String {
    let mut name = format!("{} - {}", developer_folder, parsed.plugin_name);
    if !parsed.platform.is_empty() {
        name.push(' ');
        name.push_str(&parsed.platform);
    }
    if !parsed.version.is_empty() {
        name.push(' ');
        name.push_str(&parsed.version);
    }
    name.push_str(&parsed.extension);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_full_canonical_form() {
        let parsed = parse("FabFilter_ProQ3_v3.21_x64_Setup.exe");
        assert_eq!(
            normalize(&parsed, "FabFilter"),
            "FabFilter - ProQ3 x64 3.21.exe"
        );
    }

    #[test]
    fn test_folder_name_is_authoritative() {
        let parsed = parse("fabfilter_ProQ3.exe");
        assert_eq!(normalize(&parsed, "FabFilter"), "FabFilter - ProQ3.exe");
    }

    #[test]
    fn test_platform_precedes_version() {
        let parsed = parse("Vendor - Comp 2.0 x64.zip");
        assert_eq!(normalize(&parsed, "Vendor"), "Vendor - Comp x64 2.0.zip");
    }

    #[test]
    fn test_suffix_is_dropped() {
        let parsed = parse("Vendor - Comp Setup.exe");
        assert_eq!(normalize(&parsed, "Vendor"), "Vendor - Comp.exe");
    }

    #[test]
    fn test_idempotent_on_canonical_names() {
        for canonical in [
            "FabFilter - ProQ3 x64 3.21.exe",
            "Waves - SSLChannel 1.0.vst3",
            "Vendor - Delay.zip",
            "Vendor - Comp win64 1.2.3.msi",
        ] {
            let developer = canonical.split(" - ").next().unwrap();
            assert_eq!(normalize(&parse(canonical), developer), canonical);
        }
    }

    #[test]
    fn test_round_trip_stability() {
        for input in [
            "FabFilter_ProQ3_v3.21_x64_Setup.exe",
            "totally strange   name.zip",
            "Vendor-Thing_v2_mac_Installer.dmg",
            "NoExtensionAtAll",
        ] {
            let once = normalize(&parse(input), "Vendor");
            let twice = normalize(&parse(&once), "Vendor");
            assert_eq!(once, twice, "unstable for input: {input}");
        }
    }
}
