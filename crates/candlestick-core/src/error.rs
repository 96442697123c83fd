// File: crates/candlestick-core/src/error.rs
// Summary: Boundary errors for host input that cannot be interpreted at all.

use thiserror::Error;

/// Errors raised while turning host input into core types.
///
/// The render pipeline itself never fails; these only surface when a caller
/// parses raw host payloads (settings JSON, role names).
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("settings bag is not valid JSON: {0}")]
    SettingsJson(#[from] serde_json::Error),

    #[error("settings bag must be a JSON object, got {0}")]
    SettingsShape(&'static str),

    #[error("unknown measure role `{0}` (expected open, close, high, low or trend)")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
