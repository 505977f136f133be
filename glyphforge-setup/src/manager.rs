//! One-call setup facade.
//!
//! [`FontManager`] wires configuration into the discovery engine and
//! produces a [`SetupReport`] a rendering consumer can apply: the best
//! CJK-capable font, the fallback chain behind it, and (when enabled) the
//! emoji chain. The manager never touches any rendering library itself.

use anyhow::{Context, Result};
use glyphforge_core::{
    sort_emoji_fonts_by_preference, Adapter, FontDetector, FontRecord, Platform,
};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::SetupConfig;

/// Outcome of a setup pass.
#[derive(Debug, Clone)]
pub struct SetupReport {
    /// Whether a usable CJK font was found.
    pub success: bool,
    /// The selected font, best candidate first in rank order.
    pub font_used: Option<FontRecord>,
    /// Names to try after the selected font, in order.
    pub fallback_fonts: Vec<String>,
    /// Emoji chain, ordered by the configured color preference. Empty when
    /// emoji fallback is disabled.
    pub emoji_fonts: Vec<FontRecord>,
    /// Non-fatal problems encountered during setup.
    pub warnings: Vec<String>,
    /// Wall-clock duration of the pass.
    pub elapsed: Duration,
    /// Platform the pass ran on.
    pub platform: Platform,
}

impl SetupReport {
    /// Whether any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Orchestrates configuration, discovery and ranking.
pub struct FontManager {
    config: SetupConfig,
    detector: FontDetector,
    platform: Platform,
    current: Option<FontRecord>,
}

impl FontManager {
    /// Create a manager for the running platform, loading configuration
    /// from `config_path` (or the default location).
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = SetupConfig::load(config_path)?;
        let platform = Platform::current();
        let mut adapter =
            Adapter::new(platform).context("no platform profile for this system")?;
        if let Some(preferred) = config.preferred_for(platform) {
            adapter = adapter.with_preferred_fonts(preferred.to_vec());
        }
        let detector = FontDetector::new(Arc::new(adapter), config.cache_enabled);
        info!("FontManager initialized on {}", platform.as_str());
        Ok(Self {
            config,
            detector,
            platform,
            current: None,
        })
    }

    /// Assemble a manager from an already-resolved configuration and
    /// detector. The seam for embedders with their own adapter setup, and
    /// for tests.
    pub fn from_parts(config: SetupConfig, detector: FontDetector) -> Self {
        let platform = detector.adapter().platform();
        Self {
            config,
            detector,
            platform,
            current: None,
        }
    }

    /// Run a full setup pass: scan, rank, pick the best CJK font and build
    /// the fallback chains.
    ///
    /// Finding zero fonts is not an error — the report carries a warning
    /// and `success = false`, and the caller decides whether that is fatal.
    pub fn setup(&mut self, force_rescan: bool) -> Result<SetupReport> {
        let started = Instant::now();
        let mut warnings = Vec::new();

        let ranked = self
            .detector
            .cjk_fonts(force_rescan)
            .context("font scan failed")?;

        let font_used = ranked.first().cloned();
        match &font_used {
            Some(font) => info!(
                "selected font: {} (score {:.2})",
                font.name, font.quality_score
            ),
            None => {
                warn!("no CJK-capable fonts found");
                warnings.push("no CJK-capable fonts found on this system".to_string());
            }
        }

        // Chain: the remaining ranked candidates, then the configured
        // generic fallbacks, without duplicates.
        let mut fallback_fonts: Vec<String> = Vec::new();
        for record in ranked.iter().skip(1) {
            if !fallback_fonts.contains(&record.name) {
                fallback_fonts.push(record.name.clone());
            }
        }
        for name in &self.config.fallback_fonts {
            let is_selected = font_used
                .as_ref()
                .map(|font| &font.name == name)
                .unwrap_or(false);
            if !is_selected && !fallback_fonts.contains(name) {
                fallback_fonts.push(name.clone());
            }
        }

        let emoji_fonts = if self.config.emoji_fallback {
            let records = self
                .detector
                .detect_emoji_fonts()
                .context("emoji font detection failed")?;
            if records.is_empty() {
                warnings.push("emoji fallback enabled but no emoji fonts were found".to_string());
            }
            sort_emoji_fonts_by_preference(records, self.config.emoji_prefer_color)
        } else {
            Vec::new()
        };

        self.current = font_used.clone();
        let success = font_used.is_some();
        Ok(SetupReport {
            success,
            font_used,
            fallback_fonts,
            emoji_fonts,
            warnings,
            elapsed: started.elapsed(),
            platform: self.platform,
        })
    }

    /// Every font the scan can see, unranked.
    pub fn available_fonts(&mut self) -> Result<Vec<FontRecord>> {
        self.detector.scan(false).context("font scan failed")
    }

    /// Find a font by (possibly partial) name.
    pub fn find_font(&mut self, name: &str) -> Result<Option<FontRecord>> {
        self.detector
            .find_by_name(name)
            .context("font lookup failed")
    }

    /// The font selected by the last successful setup pass.
    pub fn current_font(&self) -> Option<&FontRecord> {
        self.current.as_ref()
    }

    /// The resolved configuration in effect.
    pub fn config(&self) -> &SetupConfig {
        &self.config
    }

    /// See [`glyphforge_core::verify_font`].
    pub fn verify(&self, path: &Path) -> bool {
        self.detector.verify(path)
    }

    /// Drop the detector's cached scan state.
    pub fn clear_cache(&mut self) {
        self.detector.clear_cache();
    }
}
