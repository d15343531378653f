//! Roster Core
//!
//! Platform-agnostic domain types and error handling for the Roster users client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserId`, `UserCollection`
//! - **Drafts**: `CreationDraft`, the client-local form state for a user that
//!   has not been created yet, and its validation
//! - **Error Handling**: `CoreError` and `Result`
//!
//! Nothing in here performs I/O. The HTTP client lives in `roster-client` and
//! the view state machines in `roster-view`.
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::{CreationDraft, DraftField, User, UserCollection, UserId};
//!
//! let mut users = UserCollection::from(vec![User::new(1, "Ana")]);
//!
//! let mut draft = CreationDraft::default();
//! draft.set(DraftField::Name, "Bo");
//! let new_user = draft.to_new_user().expect("valid draft");
//! assert_eq!(new_user.name, "Bo");
//!
//! // The backend assigns the id; the client only merges what it gets back.
//! users.merge(User::new(2, "Bo"));
//! assert_eq!(users.len(), 2);
//! assert!(users.contains(&UserId::from(2)));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
