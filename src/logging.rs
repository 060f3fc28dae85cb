//! stderr logging. Standard output is reserved for the JSON line.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Filter for a `-v` count: none keeps `fallback`.
pub fn level_for_verbosity(verbose: u8, fallback: &str) -> String {
    match verbose {
        0 => fallback.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level`. Colors only
/// when stderr is a terminal.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL));

    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0, "info"), "info");
        assert_eq!(level_for_verbosity(1, "info"), "debug");
        assert_eq!(level_for_verbosity(5, "info"), "trace");
    }
}
