//! Error types for view state management

use roster_core::types::FieldError;
use thiserror::Error;

/// Lifecycle errors of the root view
///
/// These are misuse of the view (wrong order of calls, updates after
/// teardown), not backend failures. Backend failures are recovered inside the
/// view and surfaced as visible state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// `mount` was called a second time
    #[error("View is already mounted")]
    AlreadyMounted,

    /// An operation that needs a mounted view ran before `mount`
    #[error("View is not mounted")]
    NotMounted,

    /// The view was torn down; no further state updates are allowed
    #[error("View has been torn down")]
    TornDown,

    /// A create resolution arrived with no submission in flight
    #[error("No submission in flight")]
    NoSubmissionInFlight,
}

/// Reasons a submit attempt issued no request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The draft failed local validation
    #[error("Draft is invalid")]
    Invalid(Vec<FieldError>),

    /// A create request is already in flight
    #[error("A submission is already in flight")]
    SubmitInFlight,
}

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ViewError>;
