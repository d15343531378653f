/// Core error types for Roster
use crate::types::FieldError;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Roster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A draft failed local validation; carries every offending field
    #[error("Invalid draft: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
}

impl CoreError {
    /// Field-level errors carried by this error, if any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
