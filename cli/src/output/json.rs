//! JSON output helpers for `--json` code paths.

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print `value` as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// ```json
/// { "error": true, "message": "..." }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str) -> Result<String> {
    to_pretty(&serde_json::json!({
        "error": true,
        "message": message,
    }))
}
