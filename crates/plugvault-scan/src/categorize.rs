//! File-role classification and rename planning for a plugin unit.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use plugvault_core::{normalize, parse, CategorizedFiles, FileRole, ParsedFileName, PluginUnit};

use crate::walker::extension_of;

/// Classify a unit's files into roles.
///
/// Pass one isolates installer-class files: the first `.zip` becomes the
/// unit's archive and the first `.exe`/`.msi` its installer (first-wins;
/// later candidates land in `other_files`, so no file is ever dropped or
/// shadowed). Pass two classifies the remainder by extension. Pure
/// observation, no filesystem access.
pub fn categorize(files: &[PathBuf]) -> CategorizedFiles {
    let mut result = CategorizedFiles::default();
    let mut remaining = Vec::new();

    for path in files {
        match role_of(path) {
            FileRole::Archive if result.zip_file.is_none() => {
                result.zip_file = Some(path.clone());
            }
            FileRole::Installer if result.executable_file.is_none() => {
                result.executable_file = Some(path.clone());
            }
            _ => remaining.push(path),
        }
    }

    for path in remaining {
        match role_of(path) {
            FileRole::Documentation => result.documentation_files.push(path.clone()),
            FileRole::Image => result.image_files.push(path.clone()),
            _ => result.other_files.push(path.clone()),
        }
    }

    result
}

fn role_of(path: &Path) -> FileRole {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileRole::from_extension(&extension_of(&file_name))
}

/// One intended rename: a file and the basename it should end up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// File to rename.
    pub path: PathBuf,
    /// Desired basename within the same directory.
    pub desired_name: String,
}

/// Compute the rename intents for a categorized unit.
///
/// The archive and installer are renamed to their own canonical forms
/// (parse then normalize against the developer folder name). Images,
/// when enabled, are renamed to carry the unit's base name so generated
/// documentation can reference them predictably. Desired names are made
/// unique within the plan up front, so the files of one unit never race
/// each other for the same target.
pub fn plan_renames(
    unit: &PluginUnit,
    categorized: &CategorizedFiles,
    rename_images: bool,
) -> Vec<RenamePlan> {
    let developer = unit.developer_name();
    let mut plans = Vec::new();
    let mut claimed: HashSet<String> = HashSet::new();

    let mut push = |path: &PathBuf, desired: String| {
        let desired = claim_unique(&mut claimed, desired);
        plans.push(RenamePlan {
            path: path.clone(),
            desired_name: desired,
        });
    };

    for path in categorized.zip_file.iter().chain(categorized.executable_file.iter()) {
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            push(path, normalize(&parse(file_name), &developer));
        }
    }

    if rename_images {
        for path in &categorized.image_files {
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                let image_name = ParsedFileName {
                    plugin_name: unit.base_name.clone(),
                    extension: extension_of(file_name),
                    ..ParsedFileName::default()
                };
                push(path, normalize(&image_name, &developer));
            }
        }
    }

    plans
}

/// Reserve a desired name, appending ` (n)` before the extension when
/// the plan already claims it.
fn claim_unique(claimed: &mut HashSet<String>, desired: String) -> String {
    if claimed.insert(desired.clone()) {
        return desired;
    }

    let (stem, extension) = match desired.rfind('.') {
        Some(idx) if idx > 0 => (&desired[..idx], &desired[idx..]),
        _ => (desired.as_str(), ""),
    };

    for i in 1.. {
        let candidate = format!("{} ({}){}", stem, i, extension);
        if claimed.insert(candidate.clone()) {
            return candidate;
        }
    }
    unreachable!("counter space exhausted");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/plugins/Vendor/{n}"))).collect()
    }

    #[test]
    fn test_categorize_roles() {
        let files = paths(&[
            "Vendor - Comp.zip",
            "Vendor - Comp Setup.exe",
            "manual.pdf",
            "screenshot.png",
            "Vendor - Comp.vst3",
        ]);

        let result = categorize(&files);
        assert_eq!(result.zip_file, Some(files[0].clone()));
        assert_eq!(result.executable_file, Some(files[1].clone()));
        assert_eq!(result.documentation_files, vec![files[2].clone()]);
        assert_eq!(result.image_files, vec![files[3].clone()]);
        assert_eq!(result.other_files, vec![files[4].clone()]);
    }

    #[test]
    fn test_categorize_first_wins_rest_to_other() {
        let files = paths(&["a.zip", "b.zip", "a.exe", "b.msi"]);

        let result = categorize(&files);
        assert_eq!(result.zip_file, Some(files[0].clone()));
        assert_eq!(result.executable_file, Some(files[2].clone()));
        assert_eq!(result.other_files, vec![files[1].clone(), files[3].clone()]);
    }

    #[test]
    fn test_categorize_is_complete_and_exclusive() {
        let files = paths(&[
            "a.zip", "b.zip", "c.exe", "d.msi", "e.pdf", "f.md", "g.txt", "h.png", "i.jpeg",
            "j.gif", "k.webp", "l.vst3", "m", "n.dll",
        ]);

        let result = categorize(&files);
        assert_eq!(result.file_count(), files.len());

        let mut seen: Vec<&PathBuf> = result.all_files().collect();
        seen.sort();
        let mut expected: Vec<&PathBuf> = files.iter().collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_plan_renames_installers_and_images() {
        let files = paths(&[
            "Vendor_Comp_v2.0_x64_Setup.exe",
            "Vendor_Comp_v2.0_screenshot.png",
            "manual.pdf",
        ]);
        let unit = PluginUnit::new(
            "Comp".to_string(),
            PathBuf::from("/plugins/Vendor"),
            files.clone(),
        );
        let categorized = categorize(&files);

        let plans = plan_renames(&unit, &categorized, true);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].desired_name, "Vendor - Comp x64 2.0.exe");
        assert_eq!(plans[1].desired_name, "Vendor - Comp.png");
    }

    #[test]
    fn test_plan_renames_without_image_rename() {
        let files = paths(&["Vendor_Comp_v2.0.exe", "shot.png"]);
        let unit = PluginUnit::new(
            "Comp".to_string(),
            PathBuf::from("/plugins/Vendor"),
            files.clone(),
        );
        let categorized = categorize(&files);

        let plans = plan_renames(&unit, &categorized, false);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].path, files[0]);
    }

    #[test]
    fn test_plan_desired_names_are_unique() {
        let files = paths(&["one.png", "two.png", "three.png"]);
        let unit = PluginUnit::new(
            "Comp".to_string(),
            PathBuf::from("/plugins/Vendor"),
            files.clone(),
        );
        let categorized = categorize(&files);

        let plans = plan_renames(&unit, &categorized, true);
        let names: Vec<&str> = plans.iter().map(|p| p.desired_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Vendor - Comp.png",
                "Vendor - Comp (1).png",
                "Vendor - Comp (2).png"
            ]
        );
    }
}
