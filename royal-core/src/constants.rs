//! Centralized defaults for the selection engine.
//!
//! These values back the embedded configuration and the fallback used when
//! the dataset or configuration cannot be loaded.

// Dataset ------------------------------------------------------------------
/// Only history documents with this `format` tag are accepted.
pub const SUPPORTED_HISTORY_FORMAT: u32 = 1;

// Selection ----------------------------------------------------------------
/// Number of maps drawn by a full reroll.
pub const DEFAULT_TARGET_COUNT: usize = 5;
/// Selectable year range offered by the filter dialog.
pub const DEFAULT_AVAILABLE_YEARS: [&str; 5] = ["2021", "2022", "2023", "2024", "2025"];
