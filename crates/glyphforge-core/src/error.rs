//! Error types for the font discovery engine.

use thiserror::Error;

/// Errors that can occur during font discovery and scoring.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The running operating system has no platform profile.
    #[error("unsupported platform: {platform} (supported: {})", .supported.join(", "))]
    UnsupportedPlatform {
        /// OS tag reported by the runtime.
        platform: String,
        /// Platforms a profile exists for.
        supported: Vec<String>,
    },

    /// A quality score left the [0.0, 1.0] range. Indicates a scoring bug,
    /// never user input.
    #[error("quality score {0} outside [0.0, 1.0]")]
    InvalidScore(f64),

    /// An external tool was not found on this system.
    #[error("tool not found: {0}")]
    ToolUnavailable(String),

    /// An external tool did not finish within its deadline.
    #[error("tool `{tool}` timed out after {seconds}s")]
    ToolTimeout {
        /// Tool binary name.
        tool: String,
        /// Deadline that was exceeded.
        seconds: u64,
    },

    /// An external tool exited with a failure status.
    #[error("tool `{tool}` failed: {message}")]
    ToolFailed {
        /// Tool binary name.
        tool: String,
        /// Stderr excerpt or exit status.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
