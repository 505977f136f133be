//! Font discovery engine.
//!
//! A [`FontDetector`] walks the platform's font directories, extracts
//! lightweight metadata from file names (no font-table parsing), scores each
//! font and hands back ranked records. Scan results live in an in-memory
//! cache for [`CACHE_TTL`]; a forced rescan or [`FontDetector::clear_cache`]
//! invalidates them.

use crate::emoji;
use crate::error::{CoreError, CoreResult};
use crate::model::{FontRecord, FontStyle, FontWeight};
use crate::platform::selector;
use crate::platform::{has_font_extension, normalize, Adapter};
use crate::scoring::quality_score;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// How long a scan result stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Smallest file size `verify_font` accepts. Anything below this cannot be
/// a usable font.
pub const MIN_FONT_FILE_SIZE: u64 = 1024;

/// Style suffixes stripped from a filename stem when deriving the display
/// name. Checked in order; only the first match is removed.
const STYLE_SUFFIXES: &[&str] = &[
    "Regular", "Bold", "Italic", "Light", "Medium", "Heavy", "Thin", "Black", "Condensed",
    "Extended", "Narrow",
];

/// Weight keywords, most specific first. The first match wins.
const WEIGHT_KEYWORDS: &[(&str, FontWeight)] = &[
    ("thin", FontWeight::Thin),
    ("ultralight", FontWeight::Thin),
    ("extralight", FontWeight::ExtraLight),
    ("semibold", FontWeight::SemiBold),
    ("demibold", FontWeight::SemiBold),
    ("extrabold", FontWeight::ExtraBold),
    ("ultrabold", FontWeight::ExtraBold),
    ("bold", FontWeight::Bold),
    ("light", FontWeight::Light),
    ("medium", FontWeight::Medium),
    ("black", FontWeight::Black),
    ("heavy", FontWeight::Black),
];

/// Slant keywords. The first match wins.
const STYLE_KEYWORDS: &[(&str, FontStyle)] = &[
    ("italic", FontStyle::Italic),
    ("oblique", FontStyle::Oblique),
];

/// Canonical capitalizations for names that usually arrive lowercased from
/// filenames.
const CANONICAL_NAMES: &[(&str, &str)] = &[
    ("microsoft yahei", "Microsoft YaHei"),
    ("simhei", "SimHei"),
    ("simsun", "SimSun"),
    ("pingfang sc", "PingFang SC"),
    ("hiragino sans gb", "Hiragino Sans GB"),
    ("arial unicode ms", "Arial Unicode MS"),
    ("noto sans cjk", "Noto Sans CJK"),
    ("wenquanyi", "WenQuanYi"),
];

/// First-matching-pattern lookup shared by the weight and style tables.
fn first_match<T: Copy>(name_lower: &str, table: &[(&str, T)], default: T) -> T {
    table
        .iter()
        .find(|(keyword, _)| name_lower.contains(keyword))
        .map(|(_, class)| *class)
        .unwrap_or(default)
}

/// Apply the canonical capitalization table to a display name.
fn canonical_display(name: &str) -> String {
    if !name.is_ascii() {
        return name.to_string();
    }
    let lower = name.to_lowercase();
    for (pattern, canonical) in CANONICAL_NAMES {
        if let Some(pos) = lower.find(pattern) {
            let mut out = String::with_capacity(name.len());
            out.push_str(&name[..pos]);
            out.push_str(canonical);
            out.push_str(&name[pos + pattern.len()..]);
            return out;
        }
    }
    name.to_string()
}

/// Derive the display name from a font file path: take the stem, strip one
/// style suffix, normalize. Falls back to the raw stem when stripping
/// leaves nothing.
fn extract_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = stem.clone();
    for suffix in STYLE_SUFFIXES {
        if let Some(prefix) = name.strip_suffix(suffix) {
            name = prefix
                .trim_matches(|c| c == '-' || c == '_' || c == ' ')
                .to_string();
            break;
        }
    }

    let name = canonical_display(&normalize(&name));
    if name.is_empty() {
        stem
    } else {
        name
    }
}

/// Whether `path` points at a usable font file: a regular file with a
/// recognized extension, at least [`MIN_FONT_FILE_SIZE`] bytes, whose first
/// four bytes are readable. Never errors.
pub fn verify_font(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() || !has_font_extension(path) || metadata.len() < MIN_FONT_FILE_SIZE {
        return false;
    }
    let Ok(mut file) = fs::File::open(path) else {
        return false;
    };
    let mut header = [0u8; 4];
    matches!(file.read(&mut header), Ok(n) if n >= 4)
}

/// Stable sort by suitability: CJK-capable fonts always precede incapable
/// ones; then lower platform priority, then higher score, then shorter name
/// (the deterministic final tie-break).
pub fn rank_fonts(mut records: Vec<FontRecord>) -> Vec<FontRecord> {
    records.sort_by(|a, b| {
        (!a.supports_cjk)
            .cmp(&!b.supports_cjk)
            .then_with(|| a.platform_priority.cmp(&b.platform_priority))
            .then_with(|| b.quality_score.total_cmp(&a.quality_score))
            .then_with(|| a.name.len().cmp(&b.name.len()))
    });
    records
}

/// Find a record by name: exact normalized match first, then the first
/// record whose normalized name contains the target.
pub fn find_in<'a>(records: &'a [FontRecord], target: &str) -> Option<&'a FontRecord> {
    let target = normalize(target).to_lowercase();
    if let Some(exact) = records
        .iter()
        .find(|record| normalize(&record.name).to_lowercase() == target)
    {
        return Some(exact);
    }
    records
        .iter()
        .find(|record| normalize(&record.name).to_lowercase().contains(&target))
}

/// Scans font directories and produces scored, rankable [`FontRecord`]s.
///
/// A detector owns its caches exclusively; share one behind external
/// locking or give each thread its own.
pub struct FontDetector {
    adapter: Arc<Adapter>,
    cache_enabled: bool,
    records: Vec<FontRecord>,
    by_name: HashMap<String, FontRecord>,
    scan_cache: HashMap<String, Vec<PathBuf>>,
    last_scan: Option<Instant>,
    scan_passes: u64,
}

impl FontDetector {
    /// Create a detector over an explicitly constructed adapter.
    pub fn new(adapter: Arc<Adapter>, cache_enabled: bool) -> Self {
        debug!(
            "FontDetector created for platform {} (cache {})",
            adapter.platform().as_str(),
            if cache_enabled { "on" } else { "off" }
        );
        Self {
            adapter,
            cache_enabled,
            records: Vec::new(),
            by_name: HashMap::new(),
            scan_cache: HashMap::new(),
            last_scan: None,
            scan_passes: 0,
        }
    }

    /// Create a detector for the running platform via the process-wide
    /// adapter cache.
    pub fn from_env() -> CoreResult<Self> {
        Ok(Self::new(selector::current_adapter()?, true))
    }

    /// The adapter this detector consults.
    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Discover fonts. Within the freshness window a repeated call returns
    /// the cached records without touching the filesystem; `force_rescan`
    /// bypasses every cache.
    pub fn scan(&mut self, force_rescan: bool) -> CoreResult<Vec<FontRecord>> {
        if !force_rescan && self.cache_enabled && !self.records.is_empty() && self.is_fresh() {
            debug!("returning {} cached font records", self.records.len());
            return Ok(self.records.clone());
        }

        let directories = self.adapter.font_directories();
        info!("scanning {} font directories", directories.len());

        let files = self.collect_font_files(&directories, force_rescan);
        info!("found {} candidate font files", files.len());

        let mut records = Vec::new();
        for file in &files {
            match self.extract_record(file) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                // A score outside [0,1] is a scoring bug, not a bad file.
                Err(err @ CoreError::InvalidScore(_)) => return Err(err),
                Err(err) => {
                    warn!("failed to read font metadata from {}: {err}", file.display());
                }
            }
        }

        if self.cache_enabled {
            self.by_name = records
                .iter()
                .map(|record| (record.name.clone(), record.clone()))
                .collect();
            self.records = records.clone();
        }
        self.last_scan = Some(Instant::now());

        info!("font scan complete: {} fonts", records.len());
        Ok(records)
    }

    /// Scan, keep only CJK-capable fonts, and rank them.
    pub fn cjk_fonts(&mut self, force_rescan: bool) -> CoreResult<Vec<FontRecord>> {
        let records = self.scan(force_rescan)?;
        let cjk: Vec<FontRecord> = records
            .into_iter()
            .filter(|record| record.supports_cjk)
            .collect();
        Ok(rank_fonts(cjk))
    }

    /// Find a font by name, scanning first if the cache is cold.
    pub fn find_by_name(&mut self, target: &str) -> CoreResult<Option<FontRecord>> {
        let records = self.scan(false)?;
        Ok(find_in(&records, target).cloned())
    }

    /// Detect installed emoji fonts via the static candidate table.
    pub fn detect_emoji_fonts(&self) -> CoreResult<Vec<FontRecord>> {
        emoji::detect_emoji_fonts(self.adapter.platform())
    }

    /// See [`verify_font`].
    pub fn verify(&self, path: &Path) -> bool {
        verify_font(path)
    }

    /// Drop all cached scan state.
    pub fn clear_cache(&mut self) {
        self.records.clear();
        self.by_name.clear();
        self.scan_cache.clear();
        self.last_scan = None;
        info!("font caches cleared");
    }

    /// Number of records in the name-keyed cache.
    pub fn cache_size(&self) -> usize {
        self.by_name.len()
    }

    /// Age of the cached scan, if any.
    pub fn cache_age(&self) -> Option<Duration> {
        self.last_scan.map(|at| at.elapsed())
    }

    /// Number of filesystem passes performed so far. A repeated `scan`
    /// inside the freshness window leaves this unchanged.
    pub fn scan_count(&self) -> u64 {
        self.scan_passes
    }

    fn is_fresh(&self) -> bool {
        self.cache_age().map(|age| age < CACHE_TTL).unwrap_or(false)
    }

    /// Enumerate candidate font files under `directories`, deduplicated and
    /// sorted so downstream extraction sees a stable ordering.
    fn collect_font_files(&mut self, directories: &[PathBuf], force_rescan: bool) -> Vec<PathBuf> {
        let cache_key = directories
            .iter()
            .map(|d| d.to_string_lossy())
            .collect::<Vec<_>>()
            .join("|");

        if !force_rescan && self.cache_enabled && self.is_fresh() {
            if let Some(cached) = self.scan_cache.get(&cache_key) {
                debug!("using cached file list ({} files)", cached.len());
                return cached.clone();
            }
        }

        self.scan_passes += 1;
        let mut files = Vec::new();

        for directory in directories {
            if !directory.is_dir() {
                warn!("font directory does not exist: {}", directory.display());
                continue;
            }
            for entry in WalkDir::new(directory) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!("cannot read font directory entry: {err}");
                        continue;
                    }
                };
                if entry.file_type().is_file() && has_font_extension(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        }

        for path in self.adapter.list_tool_fonts() {
            if has_font_extension(&path) {
                files.push(path);
            }
        }

        files.sort();
        files.dedup();

        if self.cache_enabled {
            self.scan_cache.insert(cache_key, files.clone());
        }
        files
    }

    /// Build a record for one font file. `Ok(None)` means the file was
    /// skipped (empty or unreadable); IO errors are the caller's to log.
    fn extract_record(&self, path: &Path) -> CoreResult<Option<FontRecord>> {
        let metadata = fs::metadata(path)?;
        let file_size = metadata.len();
        if file_size == 0 {
            debug!("skipping empty font file: {}", path.display());
            return Ok(None);
        }

        let mut file = fs::File::open(path)?;
        let mut header = [0u8; 4];
        if file.read(&mut header)? < 4 {
            debug!("skipping truncated font file: {}", path.display());
            return Ok(None);
        }

        let name = extract_name(path);
        let name_lower = name.to_lowercase();
        let weight = first_match(&name_lower, WEIGHT_KEYWORDS, FontWeight::Normal);
        let style = first_match(&name_lower, STYLE_KEYWORDS, FontStyle::Normal);
        let supports_cjk = self.adapter.is_cjk_font(&name, path);
        let preferred = self.adapter.preferred_fonts();
        let score = quality_score(
            &name,
            supports_cjk,
            file_size,
            self.adapter.platform(),
            &preferred,
        );
        let priority = self.adapter.priority_of(&name);

        let record = FontRecord::new(
            name,
            path.to_path_buf(),
            style,
            weight,
            supports_cjk,
            score,
            priority,
            file_size,
        )?;
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn record(
        name: &str,
        supports_cjk: bool,
        priority: u32,
        score: f64,
    ) -> FontRecord {
        FontRecord::new(
            name,
            format!("/fonts/{name}.ttf"),
            FontStyle::Normal,
            FontWeight::Normal,
            supports_cjk,
            score,
            priority,
            2 * 1024 * 1024,
        )
        .unwrap()
    }

    #[test]
    fn extract_name_strips_one_style_suffix() {
        assert_eq!(extract_name(Path::new("/f/NotoSansCJK-Regular.ttf")), "NotoSansCJK");
        assert_eq!(extract_name(Path::new("/f/Some_Font_Bold.otf")), "Some_Font");
        assert_eq!(extract_name(Path::new("/f/Plain.ttf")), "Plain");
    }

    #[test]
    fn extract_name_falls_back_to_raw_stem() {
        // Stripping "Bold" would leave nothing; the stem survives.
        assert_eq!(extract_name(Path::new("/f/Bold.ttf")), "Bold");
    }

    #[test]
    fn extract_name_applies_canonical_capitalization() {
        assert_eq!(
            extract_name(Path::new("/f/microsoft yahei.ttf")),
            "Microsoft YaHei"
        );
        assert_eq!(extract_name(Path::new("/f/simhei.ttf")), "SimHei");
    }

    #[test]
    fn weight_inference_first_match_wins() {
        let cases = [
            ("noto sans thin", FontWeight::Thin),
            ("noto sans ultralight", FontWeight::Thin),
            ("noto sans extralight", FontWeight::ExtraLight),
            ("noto sans semibold", FontWeight::SemiBold),
            ("noto sans demibold", FontWeight::SemiBold),
            ("noto sans extrabold", FontWeight::ExtraBold),
            ("noto-bold-x", FontWeight::Bold),
            ("noto sans light", FontWeight::Light),
            ("noto sans medium", FontWeight::Medium),
            ("noto sans black", FontWeight::Black),
            ("noto sans heavy", FontWeight::Black),
            ("noto sans", FontWeight::Normal),
        ];
        for (name, expected) in cases {
            assert_eq!(
                first_match(name, WEIGHT_KEYWORDS, FontWeight::Normal),
                expected,
                "for {name}"
            );
        }
    }

    #[test]
    fn style_inference() {
        assert_eq!(
            first_match("x italic", STYLE_KEYWORDS, FontStyle::Normal),
            FontStyle::Italic
        );
        assert_eq!(
            first_match("x oblique", STYLE_KEYWORDS, FontStyle::Normal),
            FontStyle::Oblique
        );
        assert_eq!(
            first_match("x", STYLE_KEYWORDS, FontStyle::Normal),
            FontStyle::Normal
        );
    }

    #[test]
    fn cjk_capable_fonts_always_rank_first() {
        let capable = record("Longer Name Font", true, 5, 0.1);
        let incapable = record("Arial", false, 1, 0.99);
        let ranked = rank_fonts(vec![incapable.clone(), capable.clone()]);
        assert_eq!(ranked[0].name, capable.name);
        assert_eq!(ranked[1].name, incapable.name);
    }

    #[test]
    fn rank_orders_by_priority_then_score_then_name_length() {
        let a = record("BB", true, 2, 0.9);
        let b = record("AA", true, 1, 0.1);
        let c = record("CC", true, 1, 0.5);
        let ranked = rank_fonts(vec![a.clone(), b.clone(), c.clone()]);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["CC", "AA", "BB"]);

        // Full tie except name length: shorter wins, and re-ranking is
        // stable across runs.
        let short = record("Hei", true, 1, 0.5);
        let long = record("Heiti SC", true, 1, 0.5);
        let first = rank_fonts(vec![long.clone(), short.clone()]);
        let second = rank_fonts(first.clone());
        assert_eq!(first[0].name, "Hei");
        assert_eq!(first, second);
    }

    #[test]
    fn find_in_prefers_exact_matches() {
        let records = vec![
            record("Noto Sans CJK SC Extended", true, 1, 0.5),
            record("Noto Sans CJK SC", true, 1, 0.5),
        ];
        let found = find_in(&records, "noto sans cjk sc").unwrap();
        assert_eq!(found.name, "Noto Sans CJK SC");

        let partial = find_in(&records, "extended").unwrap();
        assert_eq!(partial.name, "Noto Sans CJK SC Extended");

        assert!(find_in(&records, "Comic Sans").is_none());
    }

    #[test]
    fn verify_rejects_bad_files() {
        let dir = TempDir::new().unwrap();

        let empty = dir.path().join("empty.ttf");
        fs::File::create(&empty).unwrap();
        assert!(!verify_font(&empty));

        let wrong_ext = dir.path().join("font.txt");
        fs::write(&wrong_ext, vec![0u8; 4096]).unwrap();
        assert!(!verify_font(&wrong_ext));

        assert!(!verify_font(&dir.path().join("missing.ttf")));

        let small = dir.path().join("small.ttf");
        fs::write(&small, vec![0u8; 100]).unwrap();
        assert!(!verify_font(&small));
    }

    #[test]
    fn verify_accepts_wellformed_files() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.ttf");
        let mut file = fs::File::create(&good).unwrap();
        file.write_all(&vec![0u8; 4096]).unwrap();
        assert!(verify_font(&good));
    }
}
