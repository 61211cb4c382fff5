//! Logging setup
//!
//! Diagnostics go to stderr through `log`; results (digests, hashrate) are
//! printed to stdout by the commands themselves.

use std::io::Write;

/// Padded label for a log level
fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Default filter for the command-line flags; `RUST_LOG` takes precedence
pub fn default_level(quiet: bool, verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Initialize the global logger. Later calls are ignored.
pub fn init_logging(quiet: bool, verbose: bool) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level(quiet, verbose)),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", level_label(record.level()), record.args()))
    .try_init();
}
