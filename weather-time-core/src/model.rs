use serde::{Deserialize, Serialize};

use crate::{error::LookupError, text::format_decimal};

/// What every tool hands back to the agent.
///
/// Serialized as `{"status": "success", "report": ...}` or
/// `{"status": "error", "error_message": ...}` so the agent can branch on the
/// tag instead of handling faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult {
    Success { report: String },
    Error {
        #[serde(rename = "error_message")]
        message: String,
    },
}

impl ToolResult {
    pub fn success(report: impl Into<String>) -> Self {
        ToolResult::Success { report: report.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolResult::Error { message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    /// The report or the error message, whichever this is.
    pub fn text(&self) -> &str {
        match self {
            ToolResult::Success { report } => report,
            ToolResult::Error { message } => message,
        }
    }
}

impl From<Result<String, LookupError>> for ToolResult {
    fn from(res: Result<String, LookupError>) -> Self {
        match res {
            Ok(report) => ToolResult::Success { report },
            Err(err) => ToolResult::Error { message: err.to_string() },
        }
    }
}

/// Coordinates of a geocoded city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions as decoded from the weather provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    /// Celsius exactly as the provider wrote it: `15` stays `15`, `15.0`
    /// stays `15.0`.
    pub temperature_text: String,
    pub description: String,
}

impl CurrentConditions {
    /// Conditions for a reading that came in as a float.
    pub fn new(temperature_c: f64, description: impl Into<String>) -> Self {
        Self {
            temperature_c,
            temperature_text: format_decimal(temperature_c),
            description: description.into(),
        }
    }
}
