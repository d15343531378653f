//! View Events
//!
//! Event-based communication for front ends. Every transition of the root
//! view reports what changed, so a front end can re-render selectively or
//! just re-render everything after any event.

use crate::tracker::RequestToken;
use roster_core::types::{DraftField, FieldError, User, UserId};

/// Events emitted by the view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A read of the user collection was issued
    ReadIssued {
        token: RequestToken,
    },

    /// The latest read succeeded and replaced the snapshot
    SnapshotReplaced {
        token: RequestToken,
        /// Number of users in the new snapshot
        count: usize,
    },

    /// The latest read failed; the snapshot is unchanged
    ReadFailed {
        token: RequestToken,
        /// User-visible message
        message: String,
    },

    /// A superseded read resolved and was ignored
    StaleReadDiscarded {
        token: RequestToken,
    },

    /// A form field was edited
    DraftChanged {
        field: DraftField,
    },

    /// Submit was refused locally; no request was issued
    ValidationFailed {
        errors: Vec<FieldError>,
    },

    /// Submit was refused because a request is already in flight
    SubmitRejected,

    /// A create request was issued
    SubmitStarted,

    /// The backend created a user
    UserCreated {
        /// The created user, when the response carried it
        user: Option<User>,
    },

    /// A created user was merged into the snapshot
    UserMerged {
        id: UserId,
        /// `true` when appended, `false` when it replaced an existing row
        appended: bool,
    },

    /// The create request failed; the draft is kept
    CreateFailed {
        /// User-visible message
        message: String,
        /// Field-level problems reported by the backend
        field_errors: Vec<FieldError>,
    },

    /// The form was cleared by the user
    FormReset,

    /// A row was expanded or collapsed
    RowToggled {
        id: UserId,
        expanded: bool,
    },

    /// The view was torn down; in-flight work was discarded
    TornDown {
        /// Number of outstanding requests that were dropped
        dropped: usize,
    },
}
