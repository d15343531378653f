//! Types for users API configuration and error responses.

use roster_core::types::DraftField;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to the users backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Origin used for all user-resource requests (e.g. "http://localhost:8000")
    #[serde(
        default = "default_base_url",
        alias = "baseUrl",
        alias = "baseurl"
    )]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Create a config with just the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body returned by the backend (`{"detail": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

/// The `detail` member of an error body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message, e.g. `{"detail": "Email already registered"}`
    Message(String),
    /// Request validation failures, one per offending location
    Issues(Vec<ValidationIssue>),
    /// Anything else the server decided to put there
    Other(serde_json::Value),
}

/// One entry of a validation failure list.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationIssue {
    /// Path to the offending value, e.g. `["body", "name"]`
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl ValidationIssue {
    /// Draft field this issue points at, if the last path segment names one.
    pub fn field(&self) -> Option<DraftField> {
        self.loc
            .last()
            .and_then(|segment| segment.as_str())
            .and_then(DraftField::from_wire_name)
    }

    /// Dotted location, e.g. `body.name`
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(|segment| match segment {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}
