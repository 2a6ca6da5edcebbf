//! Logging bootstrap for the omboka binaries.
//!
//! Both binaries call this once at startup. `RUST_LOG` takes precedence
//! over the level passed in, so operators can still dial individual
//! targets up or down without touching the code.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at the default level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum level.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // try_init so a second call (tests, embedding) is a no-op instead of a panic
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
