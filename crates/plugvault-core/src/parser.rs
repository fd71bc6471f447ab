//! Filename decomposition.
//!
//! `parse` is a total, deterministic function from a raw filename to
//! [`ParsedFileName`]. Fields are stripped left to right from a working
//! copy of the base name, each step consuming its matched text before
//! the next step runs. The step order is load-bearing: reordering it
//! changes how ambiguous names decompose.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::ParsedFileName;

/// Leading vendor token up to the first `-`, `_`, or whitespace run.
static DEVELOPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^-]+?)(?:\s*[-_]\s*|\s+)").expect("developer pattern"));

/// Whitespace-bounded platform token, longest alternative first so
/// `win64` is not truncated to `win`.
static PLATFORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|\s)(windows|win64|win|x64|x86|osx|mac|linux)(\s|$)")
        .expect("platform pattern")
});

/// Version patterns tried longest-first so `1.2.3` is never truncated
/// to `1.2`. The `v` prefix is matched but excluded from the capture.
static VERSION_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(^|\s)[vV]?(\d+\.\d+\.\d+)(\s|$)").expect("version pattern"),
        Regex::new(r"(^|\s)[vV]?(\d+\.\d+)(\s|$)").expect("version pattern"),
        Regex::new(r"(^|\s)[vV]?(\d+)(\s|$)").expect("version pattern"),
    ]
});

/// Whitespace-bounded installer-style suffix token.
static SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\s)(installer|setup|full)(\s|$)").expect("suffix pattern"));

/// Runs of whitespace and hyphens, collapsed when rebuilding the plugin
/// name from whatever text survived the stripping steps.
static FILLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("filler pattern"));

/// Decompose a raw filename into structured fields.
///
/// Never fails; unmatched fields default to the empty string. Lowercase
/// comparison is used only for matching, extracted text keeps its
/// original case.
pub fn parse(file_name: &str) -> ParsedFileName {
    let (stem, extension) = split_extension(file_name);
    let mut working = stem.to_owned();

    let mut developer = String::new();
    if let Some((token, rest)) = take_token(&working, &DEVELOPER_RE, 1) {
        developer = token.trim().to_owned();
        working = rest;
    }

    // Underscore-delimited names are the norm in the wild; the token
    // matches below are whitespace-bounded.
    working = working.replace('_', " ");

    let mut platform = String::new();
    if let Some((token, rest)) = take_token(&working, &PLATFORM_RE, 2) {
        platform = token;
        working = rest;
    }

    let mut version = String::new();
    for pattern in VERSION_RES.iter() {
        if let Some((token, rest)) = take_token(&working, pattern, 2) {
            version = token;
            working = rest;
            break;
        }
    }

    let mut suffix = String::new();
    if let Some((token, rest)) = take_token(&working, &SUFFIX_RE, 2) {
        suffix = token;
        working = rest;
    }

    let plugin_name = FILLER_RE.replace_all(&working, " ").trim().to_owned();

    ParsedFileName {
        developer,
        plugin_name,
        platform,
        version,
        suffix,
        extension,
    }
}

/// Split off the extension, lowercased with its leading dot.
///
/// A name whose only dot is the first character (`.hidden`) has no
/// extension, and neither does one whose last dot belongs to a version
/// (`Delay 1.0`): an all-digit trailing segment is a version component,
/// not an extension.
fn split_extension(file_name: &str) -> (&str, String) {
    let Some(idx) = file_name.rfind('.') else {
        return (file_name, String::new());
    };
    if idx == 0 || file_name[idx + 1..].chars().all(|c| c.is_ascii_digit()) {
        return (file_name, String::new());
    }
    (&file_name[..idx], file_name[idx..].to_lowercase())
}

/// Extract one capture group and strip the whole match from the text,
/// leaving a single space so surrounding tokens stay separated.
fn take_token(text: &str, pattern: &Regex, group: usize) -> Option<(String, String)> {
    let caps = pattern.captures(text)?;
    let token = caps.get(group)?.as_str().to_owned();
    let full = caps.get(0)?;

    let mut rest = String::with_capacity(text.len());
    rest.push_str(&text[..full.start()]);
    rest.push(' ');
    rest.push_str(&text[full.end()..]);
    Some((token, rest))
}
