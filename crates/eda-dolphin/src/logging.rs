//! Process-wide log sink.
//!
//! Events are emitted with `tracing` under the crate's module-path targets
//! (`eda_dolphin::analyzer::missing`, ...) and written to the console with
//! timestamp, target, level and message.

use tracing_subscriber::EnvFilter;

/// Default severity when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Install the console subscriber.
///
/// `RUST_LOG` takes precedence over `level`; an unparsable `level` falls
/// back to [`DEFAULT_LOG_LEVEL`]. Returns `false` if a global subscriber
/// was already installed, in which case nothing changes.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
