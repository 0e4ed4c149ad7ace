//! Terminal display for user-facing output
//!
//! Separates concerns between logging (tracing, stderr) and the results a
//! user asked for (plans, target listings, run summaries).

pub mod status;

pub use status::{StatusDisplay, format_duration};

/// Apply the resolved color decision to every `console` style
pub fn set_colors(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
