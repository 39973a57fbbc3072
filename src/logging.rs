//! Process-wide logger setup.
//!
//! Bevy's own `LogPlugin` is disabled by the binary so that `env_logger`
//! owns the `log` facade. `RUST_LOG` takes precedence over the verbosity
//! flag.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter for a given verbosity.
///
/// Verbose runs show debug output from this crate only; engine crates stay at
/// `info` so per-frame noise does not drown the controller's messages.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    if verbose {
        format!("{},valet={}", LevelFilter::Info, LevelFilter::Debug)
    } else {
        LevelFilter::Info.to_string()
    }
}

/// Initializes the global logger.
///
/// Safe to call more than once; later calls are ignored so tests can
/// initialise logging freely.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already installed.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
