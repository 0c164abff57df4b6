//! Helpers for running `rspec` suites with predictable threading.

use rspec::{block::Suite, Configuration, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Serial configuration that aborts the test binary on the first failure,
/// so a failing example fails `cargo test`.
fn serial_config() -> Configuration {
    ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"))
}

/// Runs a suite serially so examples sharing an arena or a Bevy `App` never
/// run concurrently.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    Runner::new(serial_config(), vec![logger]).run(suite);
}
