//! Configuration loading and layering.
//!
//! Settings come from three explicit sources, combined by one rule:
//! environment overrides beat file values beat built-in defaults. Each
//! source is its own type — [`SetupConfig`] (the resolved result, also the
//! defaults), [`ConfigFile`] (every field optional, parsed from TOML) and
//! [`EnvOverrides`] — so the precedence lives in [`resolve`] and nowhere
//! else.
//!
//! The default file location is `$XDG_CONFIG_HOME/glyphforge/config.toml`.
//! A missing file is not an error; an explicitly given path must parse.

use anyhow::{Context, Result};
use glyphforge_core::Platform;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding [`SetupConfig::emoji_fallback`].
pub const EMOJI_FALLBACK_ENV: &str = "GLYPHFORGE_EMOJI_FALLBACK";

/// Environment variable overriding [`SetupConfig::emoji_prefer_color`].
pub const EMOJI_COLOR_ENV: &str = "GLYPHFORGE_EMOJI_COLOR";

/// Resolved configuration. [`Default`] holds the built-in values.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupConfig {
    /// Scan for fonts automatically during setup.
    pub auto_detect: bool,
    /// Keep scan results in the detector's in-memory cache.
    pub cache_enabled: bool,
    /// Preferred-font overrides, keyed by platform tag
    /// (`macos`/`windows`/`linux`).
    pub preferred_fonts: HashMap<String, Vec<String>>,
    /// Generic fonts appended to the end of every fallback chain.
    pub fallback_fonts: Vec<String>,
    /// Detect emoji fonts and append them to the chain.
    pub emoji_fallback: bool,
    /// Order the emoji chain color-first (vs monochrome-first).
    pub emoji_prefer_color: bool,
}

impl Default for SetupConfig {
    fn default() -> Self {
        let mut preferred_fonts = HashMap::new();
        preferred_fonts.insert(
            "macos".to_string(),
            vec![
                "Hiragino Sans GB".to_string(),
                "PingFang SC".to_string(),
                "STHeiti".to_string(),
                "Arial Unicode MS".to_string(),
            ],
        );
        preferred_fonts.insert(
            "windows".to_string(),
            vec![
                "Microsoft YaHei".to_string(),
                "SimHei".to_string(),
                "SimSun".to_string(),
                "Arial Unicode MS".to_string(),
            ],
        );
        preferred_fonts.insert(
            "linux".to_string(),
            vec![
                "Noto Sans CJK SC".to_string(),
                "WenQuanYi Zen Hei".to_string(),
                "Droid Sans Fallback".to_string(),
                "Arial Unicode MS".to_string(),
            ],
        );
        Self {
            auto_detect: true,
            cache_enabled: true,
            preferred_fonts,
            fallback_fonts: vec![
                "DejaVu Sans".to_string(),
                "Liberation Sans".to_string(),
                "Arial".to_string(),
                "Helvetica".to_string(),
            ],
            emoji_fallback: false,
            emoji_prefer_color: true,
        }
    }
}

impl SetupConfig {
    /// Load the configuration: file layer (explicit path, or the default
    /// location if present) plus environment overrides on top of defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.is_file() {
                    Some(ConfigFile::load(&default_path)?)
                } else {
                    debug!("no config file at {}, using defaults", default_path.display());
                    None
                }
            }
        };
        let config = resolve(file, EnvOverrides::from_env());
        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/glyphforge/config.toml` (or the platform
    /// equivalent).
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "glyphforge", "glyphforge")
            .context("failed to determine project directories")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The preferred-font override for `platform`, if one is configured.
    pub fn preferred_for(&self, platform: Platform) -> Option<&[String]> {
        self.preferred_fonts
            .get(platform.as_str())
            .map(|fonts| fonts.as_slice())
    }

    /// Reject preferred-font tables keyed by an unknown platform tag.
    pub fn validate(&self) -> Result<()> {
        for key in self.preferred_fonts.keys() {
            let known = Platform::supported()
                .iter()
                .any(|platform| platform.as_str() == key);
            if !known {
                anyhow::bail!(
                    "unknown platform tag in preferred_fonts: {key} (expected one of: {})",
                    Platform::supported()
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
        Ok(())
    }
}

/// The file layer. Every field is optional; absent fields fall through to
/// the defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub fonts: Option<FontsSection>,
    #[serde(default)]
    pub emoji: Option<EmojiSection>,
}

/// `[fonts]` section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FontsSection {
    #[serde(default)]
    pub auto_detect: Option<bool>,
    #[serde(default)]
    pub cache_enabled: Option<bool>,
    /// Per-platform preferred-font lists, e.g. `[fonts.preferred] linux = [...]`.
    #[serde(default)]
    pub preferred: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub fallback: Option<Vec<String>>,
}

/// `[emoji]` section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EmojiSection {
    #[serde(default)]
    pub fallback: Option<bool>,
    #[serde(default)]
    pub prefer_color: Option<bool>,
}

impl ConfigFile {
    /// Parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

/// The environment layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvOverrides {
    pub emoji_fallback: Option<bool>,
    pub emoji_prefer_color: Option<bool>,
}

impl EnvOverrides {
    /// Read the two emoji variables from the process environment. Unset or
    /// unparseable values are absent, never errors.
    pub fn from_env() -> Self {
        Self {
            emoji_fallback: std::env::var(EMOJI_FALLBACK_ENV)
                .ok()
                .and_then(|value| parse_bool_env(&value)),
            emoji_prefer_color: std::env::var(EMOJI_COLOR_ENV)
                .ok()
                .and_then(|value| parse_bool_env(&value)),
        }
    }
}

/// Tolerant boolean grammar for environment variables: `true`/`1`/`yes`/`on`
/// and `false`/`0`/`no`/`off`, case-insensitive. Anything else is `None`
/// (treated as absent).
pub fn parse_bool_env(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Combine the three layers: env non-absent > file present > default.
pub fn resolve(file: Option<ConfigFile>, env: EnvOverrides) -> SetupConfig {
    let mut config = SetupConfig::default();

    if let Some(file) = file {
        if let Some(fonts) = file.fonts {
            if let Some(auto_detect) = fonts.auto_detect {
                config.auto_detect = auto_detect;
            }
            if let Some(cache_enabled) = fonts.cache_enabled {
                config.cache_enabled = cache_enabled;
            }
            if let Some(preferred) = fonts.preferred {
                config.preferred_fonts = preferred;
            }
            if let Some(fallback) = fonts.fallback {
                config.fallback_fonts = fallback;
            }
        }
        if let Some(emoji) = file.emoji {
            if let Some(fallback) = emoji.fallback {
                config.emoji_fallback = fallback;
            }
            if let Some(prefer_color) = emoji.prefer_color {
                config.emoji_prefer_color = prefer_color;
            }
        }
    }

    if let Some(emoji_fallback) = env.emoji_fallback {
        config.emoji_fallback = emoji_fallback;
    }
    if let Some(prefer_color) = env.emoji_prefer_color {
        config.emoji_prefer_color = prefer_color;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults() {
        let config = SetupConfig::default();
        assert!(config.auto_detect);
        assert!(config.cache_enabled);
        assert!(!config.emoji_fallback);
        assert!(config.emoji_prefer_color);
        assert_eq!(config.preferred_fonts.len(), 3);
        assert_eq!(config.fallback_fonts[0], "DejaVu Sans");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bool_env_grammar() {
        for value in ["true", "True", "TRUE", "1", "yes", "Yes", "on", "ON"] {
            assert_eq!(parse_bool_env(value), Some(true), "for {value}");
        }
        for value in ["false", "False", "FALSE", "0", "no", "No", "off", "OFF"] {
            assert_eq!(parse_bool_env(value), Some(false), "for {value}");
        }
        for value in ["invalid", "maybe", "2", ""] {
            assert_eq!(parse_bool_env(value), None, "for {value}");
        }
    }

    #[test]
    fn file_layer_overrides_defaults() {
        let file = ConfigFile {
            fonts: Some(FontsSection {
                auto_detect: Some(false),
                cache_enabled: None,
                preferred: None,
                fallback: Some(vec!["Arial".to_string()]),
            }),
            emoji: Some(EmojiSection {
                fallback: Some(true),
                prefer_color: None,
            }),
        };
        let config = resolve(Some(file), EnvOverrides::default());
        assert!(!config.auto_detect);
        assert!(config.cache_enabled); // untouched by the file
        assert_eq!(config.fallback_fonts, vec!["Arial".to_string()]);
        assert!(config.emoji_fallback);
        assert!(config.emoji_prefer_color); // untouched by the file
    }

    #[test]
    fn env_layer_beats_the_file() {
        let file = ConfigFile {
            fonts: None,
            emoji: Some(EmojiSection {
                fallback: Some(false),
                prefer_color: Some(true),
            }),
        };
        let env = EnvOverrides {
            emoji_fallback: Some(true),
            emoji_prefer_color: Some(false),
        };
        let config = resolve(Some(file), env);
        assert!(config.emoji_fallback);
        assert!(!config.emoji_prefer_color);
    }

    #[test]
    fn absent_env_values_fall_through() {
        let file = ConfigFile {
            fonts: None,
            emoji: Some(EmojiSection {
                fallback: Some(true),
                prefer_color: None,
            }),
        };
        let env = EnvOverrides {
            emoji_fallback: None,
            emoji_prefer_color: None,
        };
        let config = resolve(Some(file), env);
        assert!(config.emoji_fallback); // file value survives
        assert!(config.emoji_prefer_color); // default survives
    }

    #[test]
    fn parses_a_full_toml_file() {
        let content = r#"
[fonts]
auto_detect = true
cache_enabled = false
fallback = ["DejaVu Sans", "Arial"]

[fonts.preferred]
linux = ["Noto Sans CJK SC", "WenQuanYi Zen Hei"]

[emoji]
fallback = true
prefer_color = false
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let parsed = ConfigFile::load(file.path()).unwrap();
        let config = resolve(Some(parsed), EnvOverrides::default());
        assert!(!config.cache_enabled);
        assert!(config.emoji_fallback);
        assert!(!config.emoji_prefer_color);
        assert_eq!(
            config.preferred_for(Platform::Linux).unwrap().to_vec(),
            vec![
                "Noto Sans CJK SC".to_string(),
                "WenQuanYi Zen Hei".to_string()
            ]
        );
        assert!(config.preferred_for(Platform::MacOs).is_none());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ConfigFile::load(Path::new("/nonexistent/glyphforge.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[fonts\nbroken").unwrap();
        assert!(ConfigFile::load(file.path()).is_err());
    }

    #[test]
    fn unknown_platform_tag_fails_validation() {
        let mut config = SetupConfig::default();
        config
            .preferred_fonts
            .insert("amiga".to_string(), vec!["Topaz".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_path_ends_with_the_expected_name() {
        let path = SetupConfig::default_config_path().unwrap();
        assert!(path.to_string_lossy().contains("glyphforge"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
