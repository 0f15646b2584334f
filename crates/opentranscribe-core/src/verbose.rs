//! Verbose logging support for debugging core operations.
//!
//! The desktop app has no CLI, so verbosity is switched by the
//! `OPENTRANSCRIBE_VERBOSE` environment variable at startup (see
//! [`init_from_env`]); `set_verbose` is the direct toggle.

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable that enables verbose output when set to anything
pub const VERBOSE_ENV: &str = "OPENTRANSCRIBE_VERBOSE";

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable verbose logging
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Enable verbose logging if [`VERBOSE_ENV`] is set in the environment
pub fn init_from_env() {
    if std::env::var_os(VERBOSE_ENV).is_some() {
        set_verbose(true);
    }
}

/// Check if verbose logging is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a formatted message if verbose mode is enabled
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[verbose] {}", format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // The verbose flag is process-global, so this single test exercises
    // both the direct toggle and the environment switch.
    #[test]
    fn test_env_var_enables_verbose() {
        set_verbose(false);
        init_from_env();
        assert!(!is_verbose(), "unset env var must leave verbose off");

        unsafe { std::env::set_var(VERBOSE_ENV, "1") };
        init_from_env();
        assert!(is_verbose());

        unsafe { std::env::remove_var(VERBOSE_ENV) };
        set_verbose(false);
    }
}
