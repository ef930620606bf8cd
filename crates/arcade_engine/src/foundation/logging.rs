//! Logging utilities
//!
//! The engine logs through the `log` facade. Binaries call [`init`] once at
//! startup; `RUST_LOG` selects the level.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Defaults to `info` when `RUST_LOG` is not set. Safe to call more than
/// once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

/// Initialize logging for tests, capturing output per test
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init_for_tests();
        init_for_tests();
        init();
        info!("logging initialised");
    }
}
