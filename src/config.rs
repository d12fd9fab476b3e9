//! Global configuration for runtime parsing behavior.
//!
//! This module provides thread-safe global configuration that affects
//! how filtration files are parsed without threading a flag through
//! every reader.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for strict filtration parsing.
///
/// Parsing is permissive by default: malformed lines are skipped, vertex
/// lists are read up to the first non-integer token, and duplicate vertices
/// are collapsed. In strict mode every one of those cases is a parse error.
///
/// This is set once at startup and read during parsing.
static STRICT_PARSING: AtomicBool = AtomicBool::new(false);

/// Enable or disable strict parsing.
///
/// # Example
///
/// ```
/// use persistence_barcodes::config;
///
/// // Enable at startup before any parsing
/// config::set_strict_parsing(true);
///
/// // "0.5 1 3" (an edge with one vertex) is now rejected
/// # config::set_strict_parsing(false);
/// ```
#[inline]
pub fn set_strict_parsing(enabled: bool) {
    STRICT_PARSING.store(enabled, Ordering::Release);
}

/// Check if strict parsing is enabled.
#[inline]
pub fn is_strict_parsing() -> bool {
    STRICT_PARSING.load(Ordering::Acquire)
}
