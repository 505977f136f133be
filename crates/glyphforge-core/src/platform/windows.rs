//! Windows platform profile.
//!
//! Font enumeration on Windows combines the `%WINDIR%\Fonts` sweep with the
//! registry property store (`HKLM\...\Fonts`), queried through `reg.exe` so
//! the degradation path matches the other platforms' tooling: any failure
//! falls back to the filesystem sweep alone.

use crate::error::CoreResult;
use crate::tool;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const FONT_REGISTRY_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";
const REG_QUERY_TIMEOUT: Duration = Duration::from_secs(15);

/// The Windows directory, honoring `WINDIR`.
fn windows_dir() -> PathBuf {
    std::env::var_os("WINDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows"))
}

/// Font search locations, system first.
pub(super) fn font_directories() -> Vec<PathBuf> {
    let mut dirs = vec![windows_dir().join("Fonts")];
    if let Some(base) = BaseDirs::new() {
        dirs.push(
            base.home_dir()
                .join("AppData/Local/Microsoft/Windows/Fonts"),
        );
    }
    dirs
}

/// Curated CJK-capable fonts, best first.
pub(super) const PREFERRED_FONTS: &[&str] = &[
    "Microsoft YaHei",
    "Microsoft YaHei UI",
    "SimHei",
    "SimSun",
    "NSimSun",
    "FangSong",
    "KaiTi",
    "Microsoft JhengHei",
    "MingLiU",
    "Arial Unicode MS",
];

/// Windows manages fonts through the registry; there are no config files to
/// report.
pub(super) fn font_config_paths() -> Vec<PathBuf> {
    Vec::new()
}

/// Name/path substrings that mark a CJK-capable font on Windows.
pub(super) const KEYWORDS: &[&str] = &[
    "microsoft", "yahei", "simhei", "simsun", "nsimsun", "fangsong", "kaiti", "jhenghei",
    "mingliu", "sim", "ms", "song", "hei", "kai", "fang",
];

/// Full font names known to be CJK-capable.
pub(super) const CJK_FONT_NAMES: &[&str] = &[
    "microsoft yahei",
    "yahei",
    "simhei",
    "simsun",
    "nsimsun",
    "fangsong",
    "kaiti",
    "microsoft jhenghei",
    "jhenghei",
    "mingliu",
    "pmingliu",
    "dfkai-sb",
];

/// Font files registered in the property store.
///
/// Registry values hold either absolute paths or file names relative to
/// `%WINDIR%\Fonts`; relative entries are resolved before the existence
/// check.
pub(super) fn tool_font_files() -> CoreResult<Vec<PathBuf>> {
    let output = tool::run_with_timeout("reg", &["query", FONT_REGISTRY_KEY], REG_QUERY_TIMEOUT)?;
    Ok(parse_reg_query(&output, &windows_dir().join("Fonts"))
        .into_iter()
        .filter(|path| path.is_file())
        .collect())
}

/// Extract font file paths from `reg query` output. Value lines look like
/// `    Segoe UI Emoji (TrueType)    REG_SZ    seguiemj.ttf`.
fn parse_reg_query(output: &str, fonts_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for line in output.lines() {
        let Some(type_pos) = line.find("REG_SZ") else {
            continue;
        };
        let value = line[type_pos + "REG_SZ".len()..].trim();
        if value.is_empty() {
            continue;
        }
        if is_absolute_windows_path(value) {
            paths.push(PathBuf::from(value));
        } else {
            paths.push(fonts_dir.join(value));
        }
    }
    paths
}

/// Drive-letter or UNC path check. `Path::is_absolute` is host-specific, and
/// registry values are always Windows syntax.
fn is_absolute_windows_path(value: &str) -> bool {
    let bytes = value.as_bytes();
    if value.starts_with("\\\\") {
        return true;
    }
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reg_query_parsing_resolves_relative_entries() {
        let output = "\r\nHKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\\Fonts\r\n    Segoe UI Emoji (TrueType)    REG_SZ    seguiemj.ttf\r\n    Custom Font (OpenType)    REG_SZ    C:\\Fonts\\custom.otf\r\n    Ignored line without a value type\r\n";
        let paths = parse_reg_query(output, Path::new(r"C:\Windows\Fonts"));
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], Path::new(r"C:\Windows\Fonts").join("seguiemj.ttf"));
        assert_eq!(paths[1], PathBuf::from(r"C:\Fonts\custom.otf"));
    }

    #[test]
    fn reg_query_parsing_skips_empty_values() {
        let paths = parse_reg_query("    Broken    REG_SZ    \n", Path::new(r"C:\Windows\Fonts"));
        assert!(paths.is_empty());
    }
}
