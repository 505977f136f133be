//! # glyphforge-core
//!
//! Font discovery, CJK suitability scoring and fallback ranking.
//!
//! This crate provides:
//! - Platform adapters (macOS, Windows, Linux) exposing font locations,
//!   curated preferred-font lists and script-detection heuristics
//! - A discovery engine that walks font directories, extracts lightweight
//!   metadata from file names and produces deterministically ranked records
//! - A pure scoring function combining script support, preferred-name rank,
//!   file-size plausibility and a platform bonus
//! - An emoji sub-pipeline driven by a static per-platform candidate table,
//!   orderable color-first or monochrome-first
//!
//! ## Heuristics, not introspection
//!
//! The engine never parses font tables. "Supports CJK" is inferred from
//! name and path keywords plus a file-size heuristic, which keeps a full
//! scan cheap enough to run at startup. Callers that need glyph-level
//! certainty should verify coverage downstream.
//!
//! ## Typical use
//!
//! ```no_run
//! use glyphforge_core::FontDetector;
//!
//! let mut detector = FontDetector::from_env()?;
//! let ranked = detector.cjk_fonts(false)?;
//! if let Some(best) = ranked.first() {
//!     println!("best CJK font: {}", best.name);
//! }
//! # Ok::<(), glyphforge_core::CoreError>(())
//! ```

pub mod detector;
pub mod emoji;
pub mod error;
pub mod model;
pub mod platform;
pub mod scoring;
pub mod tool;

pub use detector::{find_in, rank_fonts, verify_font, FontDetector, CACHE_TTL, MIN_FONT_FILE_SIZE};
pub use emoji::{candidates_for, detect_emoji_fonts, sort_emoji_fonts_by_preference, EmojiCandidate};
pub use error::{CoreError, CoreResult};
pub use model::{FontRecord, FontStyle, FontWeight, Platform, UNRANKED_PRIORITY};
pub use platform::selector::{clear_adapter_cache, current_adapter, reload_adapter};
pub use platform::{normalize, Adapter, FONT_EXTENSIONS};
pub use scoring::{quality_score, IDEAL_SIZE_MAX, IDEAL_SIZE_MIN, LARGE_FILE_THRESHOLD};
