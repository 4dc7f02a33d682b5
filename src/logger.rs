//! Logging with module-prefixed output.
//!
//! This module provides the `log!` macro used across the crate. Every line is
//! prefixed with a bracketed module name:
//!
//! ```text
//! [index] loaded 12 posts
//! [spa] post not found: hello-world
//! ```
//!
//! Native builds write colored prefixes to stdout. In the browser (`wasm32`)
//! the same line goes to the developer console.
//!
//! # Example
//!
//! ```ignore
//! log!("spa"; "intercepting post link: {}", href);
//! ```

#[cfg(not(target_arch = "wasm32"))]
use colored::{ColoredString, Colorize};

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Longest message printed before truncation, in bytes.
///
/// Post bodies end up in debug output occasionally; keep the console readable.
const MAX_LINE_LEN: usize = 240;

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a module prefix.
///
/// Long messages are truncated on a character boundary.
#[inline]
pub fn log(module: &str, message: &str) {
    let max_msg_len = MAX_LINE_LEN.saturating_sub(calc_prefix_len(module.len()));
    let message = truncate_str(message, max_msg_len);
    write_line(module, message);
}

#[cfg(not(target_arch = "wasm32"))]
fn write_line(module: &str, message: &str) {
    use std::io::{Write, stdout};

    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

#[cfg(target_arch = "wasm32")]
fn write_line(module: &str, message: &str) {
    let line = format!("[{module}] {message}");
    if module.eq_ignore_ascii_case("error") {
        web_sys::console::error_1(&line.into());
    } else {
        web_sys::console::log_1(&line.into());
    }
}

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Apply color to a module prefix based on module type.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "spa" => prefix.bright_blue().bold(),
        "index" | "loader" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Tests
// ============================================================================
