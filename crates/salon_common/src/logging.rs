//! Logging utilities for the salon booking proxy.
//!
//! One place to install the tracing subscriber so every binary and test
//! formats log lines the same way.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose log level follows the level passed to [`init_with_level`].
const WORKSPACE_TARGETS: &[&str] = &["salon_backend", "salon_common", "salon_config", "salon_meevo"];

/// Initialize the tracing subscriber at INFO level.
///
/// ```
/// use salon_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` directives are honoured; the workspace crates are raised to
/// `level` on top of them. Calling this more than once is harmless, the
/// first subscriber stays installed.
pub fn init_with_level(level: Level) {
    let filter = WORKSPACE_TARGETS
        .iter()
        .filter_map(|target| format!("{}={}", target, level).parse().ok())
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            filter.add_directive(directive)
        });

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
