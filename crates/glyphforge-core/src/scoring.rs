//! Quality scoring for discovered fonts.
//!
//! The score is a weighted sum of four independent terms:
//!
//! - 0.4 for CJK support
//! - 0.3 scaled by position in the platform's preferred-font list
//! - 0.2 scaled by file-size plausibility
//! - 0.1 for a platform bonus keyword in the name
//!
//! The thresholds below are heuristics inherited from field observation,
//! not measured values. They are public so embedders can see exactly what
//! the engine assumes.

use crate::model::Platform;
use crate::platform::normalize;

/// Files larger than this are assumed to carry a CJK-sized glyph set.
pub const LARGE_FILE_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Lower bound of the plausible size window for a complete CJK font.
pub const IDEAL_SIZE_MIN: u64 = 1024 * 1024;

/// Upper bound of the plausible size window.
pub const IDEAL_SIZE_MAX: u64 = 20 * 1024 * 1024;

/// Bonus keywords per platform. A small set distinct from (but overlapping)
/// the script-detection keywords: these mark fonts native to the platform.
fn bonus_keywords(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::MacOs => &["hiragino", "pingfang", "stheiti"],
        Platform::Windows => &["microsoft", "simhei", "simsun"],
        Platform::Linux => &["noto", "wenquanyi", "droid"],
        Platform::Unknown => &[],
    }
}

/// Compute the composite quality score for a font. Always in [0.0, 1.0].
pub fn quality_score(
    name: &str,
    supports_cjk: bool,
    file_size: u64,
    platform: Platform,
    preferred: &[String],
) -> f64 {
    let mut score = 0.0;

    // CJK support (40%)
    if supports_cjk {
        score += 0.4;
    }

    // Preferred-name match (30%), earlier entries worth more. Only the
    // first matching rank counts.
    if !preferred.is_empty() {
        let candidate = normalize(name).to_lowercase();
        for (rank, entry) in preferred.iter().enumerate() {
            let entry = normalize(entry).to_lowercase();
            if !entry.is_empty() && candidate.contains(&entry) {
                score += 0.3 * (1.0 - rank as f64 / preferred.len() as f64);
                break;
            }
        }
    }

    // File-size plausibility (20%). Oversized files are penalized softly:
    // the term approaches but never reaches zero.
    if file_size > 0 {
        if (IDEAL_SIZE_MIN..=IDEAL_SIZE_MAX).contains(&file_size) {
            score += 0.2;
        } else if file_size < IDEAL_SIZE_MIN {
            score += 0.2 * file_size as f64 / IDEAL_SIZE_MIN as f64;
        } else {
            score += 0.2 * IDEAL_SIZE_MAX as f64 / file_size as f64;
        }
    }

    // Platform bonus (10%)
    let name_lower = name.to_lowercase();
    if bonus_keywords(platform)
        .iter()
        .any(|keyword| name_lower.contains(keyword))
    {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}
