//! Core data model: discovered fonts and the platforms they live on.

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

/// Priority assigned to fonts that appear in no preferred-font list.
/// Lower values are better; this is the "unranked" sentinel.
pub const UNRANKED_PRIORITY: u32 = 999;

/// Weight class of a font, on the usual 100–900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum FontWeight {
    Thin = 100,
    ExtraLight = 200,
    Light = 300,
    Normal = 400,
    Medium = 500,
    SemiBold = 600,
    Bold = 700,
    ExtraBold = 800,
    Black = 900,
}

impl FontWeight {
    /// Numeric weight value (100–900).
    pub fn value(self) -> u16 {
        self as u16
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Normal
    }
}

/// Slant style of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    /// String tag for the style.
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

/// Operating systems the engine has a platform profile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
    Unknown,
}

impl Platform {
    /// Detect the platform the process is running on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            _ => Platform::Unknown,
        }
    }

    /// String tag for the platform. Also used as the key of per-platform
    /// configuration tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Unknown => "unknown",
        }
    }

    /// Platforms a profile exists for.
    pub fn supported() -> &'static [Platform] {
        &[Platform::MacOs, Platform::Windows, Platform::Linux]
    }
}

/// One discovered font.
///
/// Records are produced by a scan pass (or the emoji pipeline) and held in
/// the detector's name-keyed cache until it expires or is cleared. The
/// quality score invariant is checked at construction; a record with a score
/// outside [0.0, 1.0] cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRecord {
    /// Display name, derived from the filename stem.
    pub name: String,
    /// Absolute location of the font file.
    pub path: PathBuf,
    /// Logical family grouping. Currently equals `name`; kept separate so
    /// name-table parsing can diverge later without an API break.
    pub family: String,
    /// Slant style inferred from name keywords.
    pub style: FontStyle,
    /// Weight class inferred from name keywords.
    pub weight: FontWeight,
    /// Whether the font is judged usable for CJK text.
    pub supports_cjk: bool,
    /// Composite suitability score in [0.0, 1.0].
    pub quality_score: f64,
    /// Rank against the platform's preferred-font list; lower is better,
    /// [`UNRANKED_PRIORITY`] means unranked.
    pub platform_priority: u32,
    /// Font file size in bytes.
    pub file_size: u64,
    /// Set only by the emoji pipeline.
    pub is_emoji: bool,
    /// Whether emoji glyphs render in color. Set only by the emoji pipeline.
    pub is_color_emoji: bool,
    /// Position in the emoji candidate table; meaningless outside the emoji
    /// pipeline.
    pub emoji_priority: u32,
}

impl FontRecord {
    /// Create a record for a scanned font file.
    ///
    /// Returns [`CoreError::InvalidScore`] if `quality_score` is outside
    /// [0.0, 1.0].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        style: FontStyle,
        weight: FontWeight,
        supports_cjk: bool,
        quality_score: f64,
        platform_priority: u32,
        file_size: u64,
    ) -> CoreResult<Self> {
        let name = name.into();
        let record = Self {
            family: name.clone(),
            name,
            path: path.into(),
            style,
            weight,
            supports_cjk,
            quality_score,
            platform_priority,
            file_size,
            is_emoji: false,
            is_color_emoji: false,
            emoji_priority: 0,
        };
        record.validate()?;
        Ok(record)
    }

    /// Create a record for an emoji font candidate.
    pub fn emoji(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        is_color: bool,
        emoji_priority: u32,
        file_size: u64,
    ) -> CoreResult<Self> {
        let name = name.into();
        let record = Self {
            family: name.clone(),
            name,
            path: path.into(),
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
            supports_cjk: false,
            quality_score: 0.0,
            platform_priority: UNRANKED_PRIORITY,
            file_size,
            is_emoji: true,
            is_color_emoji: is_color,
            emoji_priority,
        };
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> CoreResult<()> {
        if !(0.0..=1.0).contains(&self.quality_score) {
            return Err(CoreError::InvalidScore(self.quality_score));
        }
        Ok(())
    }

    /// Whether the weight class is SemiBold or heavier.
    pub fn is_bold(&self) -> bool {
        self.weight.value() >= FontWeight::SemiBold.value()
    }

    /// Whether the style is slanted.
    pub fn is_italic(&self) -> bool {
        matches!(self.style, FontStyle::Italic | FontStyle::Oblique)
    }
}
