//! Linux platform profile.
//!
//! Enumeration prefers the fontconfig cache (`fc-list`) and falls back to
//! sweeping the conventional font directories when the tool is missing,
//! slow, or failing.

use crate::error::CoreResult;
use crate::tool;
use directories::BaseDirs;
use std::path::PathBuf;
use std::time::Duration;

const FC_LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Font search locations, system first.
pub(super) fn font_directories() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/usr/X11R6/lib/X11/fonts"),
    ];
    if let Some(base) = BaseDirs::new() {
        dirs.push(base.home_dir().join(".fonts"));
        dirs.push(base.home_dir().join(".local/share/fonts"));
    }
    dirs
}

/// Curated CJK-capable fonts, best first.
pub(super) const PREFERRED_FONTS: &[&str] = &[
    "Noto Sans CJK SC",
    "Noto Sans CJK TC",
    "Source Han Sans SC",
    "Source Han Sans TC",
    "WenQuanYi Zen Hei",
    "WenQuanYi Micro Hei",
    "Droid Sans Fallback",
    "AR PL UMing CN",
    "AR PL UKai CN",
    "DejaVu Sans",
];

/// fontconfig configuration stores. Informational only.
pub(super) fn font_config_paths() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/etc/fonts"),
        PathBuf::from("/usr/share/fontconfig"),
    ];
    if let Some(base) = BaseDirs::new() {
        dirs.push(base.home_dir().join(".config/fontconfig"));
    }
    dirs.into_iter().filter(|d| d.is_dir()).collect()
}

/// Name/path substrings that mark a CJK-capable font on Linux.
pub(super) const KEYWORDS: &[&str] = &[
    "noto",
    "source",
    "han",
    "wenquanyi",
    "zen",
    "hei",
    "micro",
    "droid",
    "fallback",
    "ar",
    "pl",
    "uming",
    "ukai",
    "liberation",
    "dejavu",
    "gnu",
    "freefont",
];

/// Full font names known to be CJK-capable.
pub(super) const CJK_FONT_NAMES: &[&str] = &[
    "noto sans cjk",
    "source han sans",
    "wenquanyi",
    "droid sans fallback",
    "ar pl uming",
    "ar pl ukai",
    "fireflysung",
    "wqy",
];

/// Font files known to the fontconfig cache.
pub(super) fn tool_font_files() -> CoreResult<Vec<PathBuf>> {
    let output = tool::run_with_timeout("fc-list", &["--format=%{file}\n"], FC_LIST_TIMEOUT)?;
    Ok(output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_file())
        .collect())
}
