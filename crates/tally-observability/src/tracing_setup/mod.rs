//! Tracing setup: structured JSON logging with span definitions and event functions.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TALLY_LOG";

/// Install the JSON subscriber, filtered by `TALLY_LOG` (default `info`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Install the JSON subscriber with an explicit filter (for tests or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_tracing_with_filter("debug");
        assert!(!init_tracing_with_filter("info"));
        assert!(!init_tracing());
    }
}
