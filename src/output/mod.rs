pub mod formatter;

pub use formatter::{
    format_breakdown, format_dashboard, format_health, format_prediction, format_result,
    format_samples, format_session, format_welcome, should_use_colors,
};

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty JSON for `--json` output
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
