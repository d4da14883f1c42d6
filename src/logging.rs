//! Log output for the `cardio` binary.
//!
//! Logs go to stderr so that `predict` and `batch` can write results to stdout.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Crates whose events are shown; everything else stays silent.
const TARGETS: [&str; 3] = ["cardio", "cardio_io", "cardio_knn"];

/// Maps the `-v` count to a level: none warn, `-v` info, `-vv` debug, more trace.
fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Builds `target=level` directives for every workspace crate.
fn directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber. `RUST_LOG`, when set, replaces the
/// verbosity-derived filter.
pub fn init(verbosity: u8) {
    let level = level(verbosity);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(level >= LevelFilter::DEBUG)
        .with_writer(std::io::stderr)
        .init();
}
