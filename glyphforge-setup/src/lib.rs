//! # glyphforge-setup
//!
//! Configuration and orchestration on top of [`glyphforge_core`].
//!
//! This crate provides:
//! - Layered configuration: built-in defaults, an optional TOML file at
//!   `$XDG_CONFIG_HOME/glyphforge/config.toml`, and environment overrides
//!   (`GLYPHFORGE_EMOJI_FALLBACK`, `GLYPHFORGE_EMOJI_COLOR`), combined as
//!   env > file > default
//! - [`FontManager`], the one-call facade that scans, ranks and assembles
//!   the fallback chains a rendering consumer applies
//! - A `tracing` bootstrap for embedders without their own subscriber
//!
//! ## Typical use
//!
//! ```no_run
//! use glyphforge_setup::FontManager;
//!
//! let mut manager = FontManager::new(None)?;
//! let report = manager.setup(false)?;
//! if let Some(font) = &report.font_used {
//!     println!("use {}, then {:?}", font.name, report.fallback_fonts);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod logging;
pub mod manager;

pub use config::{
    parse_bool_env, resolve, ConfigFile, EnvOverrides, SetupConfig, EMOJI_COLOR_ENV,
    EMOJI_FALLBACK_ENV,
};
pub use manager::{FontManager, SetupReport};
