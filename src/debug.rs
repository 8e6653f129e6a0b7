//! Debug logging utilities
//!
//! Diagnostics for layout resolution, enabled by the global `--debug` flag or
//! by `SDK_LAYOUT_DEBUG` in the environment. Disabled output costs one load.

use crate::env_vars;
use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize debug mode from the command-line flag.
///
/// The first call wins; the environment variable is still honored when the
/// flag is off.
pub fn init_debug(enabled: bool) {
    let _ = DEBUG_ENABLED.set(enabled || env_vars::debug_requested());
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(env_vars::debug_requested)
}

/// Macro for convenient debug logging
///
/// Usage: `debug!("resolved {}", path.display())`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[DEBUG] {}", format_args!($($arg)*));
        }
    };
}
