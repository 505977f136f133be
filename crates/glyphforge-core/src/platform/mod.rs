//! Platform capability surface.
//!
//! One [`Adapter`] struct covers every supported OS. The per-OS variation is
//! data, not subclasses: each profile module supplies directory tables,
//! preferred-font tables and keyword sets, and the adapter dispatches on its
//! [`Platform`] tag. The heuristics shared by every platform (name
//! normalization, the CJK predicate, preferred-list ranking) live here and
//! are not overridable.

pub mod selector;

mod linux;
mod macos;
mod windows;

use crate::error::{CoreError, CoreResult};
use crate::model::{Platform, UNRANKED_PRIORITY};
use crate::scoring::LARGE_FILE_THRESHOLD;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extensions recognized as font files (lowercase, no dot).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc", "woff", "woff2"];

/// Keywords that mark a CJK-capable font on any platform.
const BASE_CJK_KEYWORDS: &[&str] = &[
    "chinese", "cjk", "han", "zh", "cn", "sc", "tc", "unicode", "fallback",
];

/// Style tokens stripped from the end of a name during normalization.
const TRAILING_STYLE_TOKENS: &[&str] = &["regular", "bold", "italic", "light", "medium", "heavy"];

/// Whether `path` has a recognized font extension.
pub fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            FONT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Normalize a font name for display and comparison: collapse interior
/// whitespace runs, trim, and strip a single trailing style token
/// (`Regular`, `Bold`, ...) when it is the last of several tokens.
///
/// Case is preserved; comparisons lowercase both sides separately.
pub fn normalize(name: &str) -> String {
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() > 1 {
        if let Some(last) = tokens.last() {
            if TRAILING_STYLE_TOKENS.contains(&last.to_lowercase().as_str()) {
                tokens.pop();
            }
        }
    }
    tokens.join(" ")
}

/// Platform facts and heuristics for one operating system.
///
/// Adapters are cheap values. Construct one per platform (or use
/// [`selector::current_adapter`] for the process-wide cached one) and hand
/// it to the discovery engine.
#[derive(Debug, Clone)]
pub struct Adapter {
    platform: Platform,
    preferred_override: Option<Vec<String>>,
    directories_override: Option<Vec<PathBuf>>,
    tool_lookup: bool,
}

impl Adapter {
    /// Create an adapter for `platform`.
    ///
    /// Returns [`CoreError::UnsupportedPlatform`] when no profile exists.
    pub fn new(platform: Platform) -> CoreResult<Self> {
        if !Platform::supported().contains(&platform) {
            return Err(CoreError::UnsupportedPlatform {
                platform: platform.as_str().to_string(),
                supported: Platform::supported()
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect(),
            });
        }
        Ok(Self {
            platform,
            preferred_override: None,
            directories_override: None,
            tool_lookup: true,
        })
    }

    /// Create an adapter for the platform the process is running on.
    pub fn detect() -> CoreResult<Self> {
        Self::new(Platform::current())
    }

    /// The platform this adapter describes.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Replace the built-in preferred-font list, e.g. from configuration.
    /// The override drives both priority ranking and scoring.
    pub fn with_preferred_fonts(mut self, fonts: Vec<String>) -> Self {
        self.preferred_override = Some(fonts);
        self
    }

    /// Replace the OS-conventional font directories. Intended for embedders
    /// that manage their own font store, and for tests.
    pub fn with_font_directories(mut self, directories: Vec<PathBuf>) -> Self {
        self.directories_override = Some(directories);
        self
    }

    /// Disable external tool enumeration (`fc-list`, registry queries),
    /// leaving the filesystem sweep as the only source.
    pub fn without_tool_lookup(mut self) -> Self {
        self.tool_lookup = false;
        self
    }

    /// Ordered font search directories. Non-existent built-in locations are
    /// silently excluded.
    pub fn font_directories(&self) -> Vec<PathBuf> {
        if let Some(dirs) = &self.directories_override {
            return dirs.clone();
        }
        let candidates = match self.platform {
            Platform::MacOs => macos::font_directories(),
            Platform::Windows => windows::font_directories(),
            Platform::Linux => linux::font_directories(),
            Platform::Unknown => Vec::new(),
        };
        candidates.into_iter().filter(|d| d.is_dir()).collect()
    }

    /// The platform's curated preferred-font names, best first, or the
    /// configured override.
    pub fn preferred_fonts(&self) -> Vec<String> {
        if let Some(fonts) = &self.preferred_override {
            return fonts.clone();
        }
        let built_in = match self.platform {
            Platform::MacOs => macos::PREFERRED_FONTS,
            Platform::Windows => windows::PREFERRED_FONTS,
            Platform::Linux => linux::PREFERRED_FONTS,
            Platform::Unknown => &[],
        };
        built_in.iter().map(|name| name.to_string()).collect()
    }

    /// OS font-configuration-store locations. Informational; scoring does
    /// not consult them.
    pub fn font_config_paths(&self) -> Vec<PathBuf> {
        match self.platform {
            Platform::MacOs => macos::font_config_paths(),
            Platform::Windows => windows::font_config_paths(),
            Platform::Linux => linux::font_config_paths(),
            Platform::Unknown => Vec::new(),
        }
    }

    /// Lowercase substrings that mark a font name or path as CJK-capable on
    /// this platform.
    pub fn platform_keywords(&self) -> &'static [&'static str] {
        match self.platform {
            Platform::MacOs => macos::KEYWORDS,
            Platform::Windows => windows::KEYWORDS,
            Platform::Linux => linux::KEYWORDS,
            Platform::Unknown => &[],
        }
    }

    /// Whether the font looks usable for CJK text.
    ///
    /// True when a generic or platform keyword occurs in the name or path,
    /// when the file exceeds [`LARGE_FILE_THRESHOLD`] (CJK glyph sets are
    /// large), or when the platform-specific override list matches.
    pub fn is_cjk_font(&self, name: &str, path: &Path) -> bool {
        let name_lower = name.to_lowercase();
        let path_lower = path.to_string_lossy().to_lowercase();

        for keyword in BASE_CJK_KEYWORDS.iter().chain(self.platform_keywords()) {
            if name_lower.contains(keyword) || path_lower.contains(keyword) {
                return true;
            }
        }

        let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        if file_size > LARGE_FILE_THRESHOLD {
            return true;
        }

        self.is_cjk_font_platform_specific(&name_lower, &path_lower)
    }

    /// Platform-specific override predicate, consulted when the generic
    /// heuristics were inconclusive.
    fn is_cjk_font_platform_specific(&self, name_lower: &str, path_lower: &str) -> bool {
        let known_names: &[&str] = match self.platform {
            Platform::MacOs => macos::CJK_FONT_NAMES,
            Platform::Windows => windows::CJK_FONT_NAMES,
            Platform::Linux => linux::CJK_FONT_NAMES,
            Platform::Unknown => &[],
        };
        if known_names.iter().any(|known| name_lower.contains(known)) {
            return true;
        }
        if self.platform == Platform::MacOs {
            return macos::CJK_PATH_HINTS
                .iter()
                .any(|hint| path_lower.contains(hint));
        }
        false
    }

    /// Rank of `name` against the preferred-font list: the first preferred
    /// entry contained in the normalized name wins with `index + 1`;
    /// [`UNRANKED_PRIORITY`] when nothing matches.
    pub fn priority_of(&self, name: &str) -> u32 {
        let candidate = normalize(name).to_lowercase();
        for (index, preferred) in self.preferred_fonts().iter().enumerate() {
            let preferred = normalize(preferred).to_lowercase();
            if !preferred.is_empty() && candidate.contains(&preferred) {
                return index as u32 + 1;
            }
        }
        UNRANKED_PRIORITY
    }

    /// Font files reported by platform tooling (`fc-list` on Linux, the
    /// registry property store on Windows). Degrades to an empty list on
    /// any tool problem; the filesystem sweep remains the source of truth.
    pub fn list_tool_fonts(&self) -> Vec<PathBuf> {
        if !self.tool_lookup {
            return Vec::new();
        }
        let listed = match self.platform {
            Platform::Linux => linux::tool_font_files(),
            Platform::Windows => windows::tool_font_files(),
            Platform::MacOs | Platform::Unknown => Ok(Vec::new()),
        };
        match listed {
            Ok(paths) => {
                debug!("platform tooling reported {} font files", paths.len());
                paths
            }
            Err(err) => {
                warn!("font tooling unavailable, using directory scan only: {err}");
                Vec::new()
            }
        }
    }
}
