//! macOS platform profile.

use directories::BaseDirs;
use std::path::PathBuf;

/// Font search locations, system first.
pub(super) fn font_directories() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(base) = BaseDirs::new() {
        dirs.push(base.home_dir().join("Library/Fonts"));
    }
    dirs
}

/// Curated CJK-capable fonts, best first.
pub(super) const PREFERRED_FONTS: &[&str] = &[
    "Hiragino Sans GB",
    "PingFang SC",
    "STHeiti",
    "Hiragino Sans",
    "Arial Unicode MS",
    "Apple LiGothic",
    "STSong",
    "STKaiti",
    "STFangsong",
];

/// Font collection stores. Informational only.
pub(super) fn font_config_paths() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/System/Library/FontCollections"),
        PathBuf::from("/Library/FontCollections"),
    ];
    if let Some(base) = BaseDirs::new() {
        dirs.push(base.home_dir().join("Library/FontCollections"));
    }
    dirs.into_iter().filter(|d| d.is_dir()).collect()
}

/// Name/path substrings that mark a CJK-capable font on macOS.
pub(super) const KEYWORDS: &[&str] = &[
    "hiragino", "pingfang", "heiti", "songti", "kaiti", "fangsong", "apple", "ligothic", "stfont",
    "st", "gb", "sc", "tc", "system", "ui", "sf", "sfns",
];

/// Full font names known to be CJK-capable, consulted when the generic
/// heuristics are inconclusive.
pub(super) const CJK_FONT_NAMES: &[&str] = &[
    "hiragino sans gb",
    "pingfang sc",
    "pingfang tc",
    "pingfang hk",
    "stheiti",
    "stsong",
    "stkaiti",
    "stfangsong",
    "apple ligothic",
    "ligothic medium",
    "ligothic light",
];

/// Path substrings that mark a bundled CJK font.
pub(super) const CJK_PATH_HINTS: &[&str] = &["chinese", "cjk", "han", "gb", "sc", "tc"];
