//! Error types for the Roster client.

use roster_core::types::FieldError;
use thiserror::Error;

/// Errors that can occur when talking to the users backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server rejected the submitted fields
    #[error("Server rejected the request ({status}): {}", describe_rejection(.fields, .message))]
    Validation {
        status: u16,
        /// Problems the server attributed to a known draft field
        fields: Vec<FieldError>,
        /// Problems that could not be attributed to a field
        message: String,
    },

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Field-level problems reported by the server, if any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } | Self::Validation { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn describe_rejection(fields: &[FieldError], message: &str) -> String {
    let mut parts: Vec<String> = fields.iter().map(ToString::to_string).collect();
    if !message.is_empty() {
        parts.push(message.to_string());
    }
    parts.join("; ")
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::types::DraftField;

    #[test]
    fn test_validation_display_lists_fields_then_message() {
        let err = ClientError::Validation {
            status: 422,
            fields: vec![FieldError::new(DraftField::Email, "value is not a valid email address")],
            message: "body: extra fields not permitted".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Server rejected the request (422): email: value is not a valid email address; body: extra fields not permitted"
        );
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.field_errors().len(), 1);
    }

    #[test]
    fn test_non_validation_errors_have_no_fields() {
        let err = ClientError::ServerError {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(err.field_errors().is_empty());
        assert_eq!(ClientError::ParseError("x".into()).status(), None);
    }
}
