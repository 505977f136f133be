//! Logging bootstrap for binaries and tests embedding the library.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging at `INFO`.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize logging at `level`. Safe to call more than once; only the
/// first call installs a subscriber.
pub fn init_with_level(level: Level) {
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .try_init();
}
