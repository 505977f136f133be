//! Emoji font discovery.
//!
//! Unlike the main engine this pipeline scans nothing: each platform has a
//! short, ordered table of well-known emoji fonts and their installed
//! locations. Candidates that pass the shared verification probe become
//! records; everything else is skipped silently. Table order is the
//! preference order within a color class.

use crate::detector::verify_font;
use crate::error::CoreResult;
use crate::model::{FontRecord, Platform};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// One entry of the per-platform emoji candidate table.
#[derive(Debug, Clone)]
pub struct EmojiCandidate {
    /// Font display name.
    pub name: String,
    /// Expected installed location.
    pub path: PathBuf,
    /// Whether glyphs render in color.
    pub is_color: bool,
}

impl EmojiCandidate {
    fn new(name: &str, path: impl Into<PathBuf>, is_color: bool) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            is_color,
        }
    }
}

fn windows_fonts_dir() -> PathBuf {
    std::env::var_os("WINDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows"))
        .join("Fonts")
}

/// The ordered emoji candidate table for `platform`.
pub fn candidates_for(platform: Platform) -> Vec<EmojiCandidate> {
    match platform {
        Platform::MacOs => vec![
            EmojiCandidate::new(
                "Apple Color Emoji",
                "/System/Library/Fonts/Apple Color Emoji.ttc",
                true,
            ),
            EmojiCandidate::new("Apple Symbols", "/System/Library/Fonts/Apple Symbols.ttf", false),
        ],
        Platform::Windows => {
            let fonts = windows_fonts_dir();
            vec![
                EmojiCandidate::new("Segoe UI Emoji", fonts.join("seguiemj.ttf"), true),
                EmojiCandidate::new("Segoe UI Symbol", fonts.join("seguisym.ttf"), false),
            ]
        }
        Platform::Linux => vec![
            EmojiCandidate::new(
                "Noto Color Emoji",
                "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
                true,
            ),
            EmojiCandidate::new(
                "Noto Emoji",
                "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
                false,
            ),
            EmojiCandidate::new(
                "Twemoji Mozilla",
                "/usr/share/fonts/truetype/twemoji/TwemojiMozilla.ttf",
                true,
            ),
            EmojiCandidate::new(
                "JoyPixels",
                "/usr/share/fonts/truetype/joypixels/JoyPixels.ttf",
                true,
            ),
        ],
        Platform::Unknown => Vec::new(),
    }
}

/// Detect installed emoji fonts for `platform`, in candidate-table order.
pub fn detect_emoji_fonts(platform: Platform) -> CoreResult<Vec<FontRecord>> {
    let records = detect_from_candidates(&candidates_for(platform))?;
    info!("detected {} emoji fonts", records.len());
    Ok(records)
}

fn detect_from_candidates(candidates: &[EmojiCandidate]) -> CoreResult<Vec<FontRecord>> {
    let mut records = Vec::new();
    for (position, candidate) in candidates.iter().enumerate() {
        if !verify_font(&candidate.path) {
            debug!(
                "emoji candidate not installed: {} ({})",
                candidate.name,
                candidate.path.display()
            );
            continue;
        }
        let file_size = fs::metadata(&candidate.path).map(|m| m.len()).unwrap_or(0);
        records.push(FontRecord::emoji(
            candidate.name.clone(),
            candidate.path.clone(),
            candidate.is_color,
            position as u32,
            file_size,
        )?);
    }
    Ok(records)
}

/// Order emoji records by color preference: the matching color class first,
/// each class in candidate-table order.
pub fn sort_emoji_fonts_by_preference(
    mut records: Vec<FontRecord>,
    prefer_color: bool,
) -> Vec<FontRecord> {
    records.sort_by(|a, b| {
        (a.is_color_emoji != prefer_color)
            .cmp(&(b.is_color_emoji != prefer_color))
            .then_with(|| a.emoji_priority.cmp(&b.emoji_priority))
    });
    records
}
