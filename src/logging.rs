//! Logger set-up shared by both binaries.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Default level for the `skirmish` crate's own messages.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages (state transitions, hits) are
/// printed. Otherwise only info level and above are shown. `RUST_LOG`
/// overrides both.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set, so tests can call
    // `init` repeatedly.
    if let Err(e) = builder.try_init() {
        debug!("logger already initialised: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, LevelFilter::Debug)]
    #[case(false, LevelFilter::Info)]
    fn verbosity_selects_level(#[case] verbose: bool, #[case] expected: LevelFilter) {
        assert_eq!(default_level(verbose), expected);
    }

    #[rstest]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
    }
}
