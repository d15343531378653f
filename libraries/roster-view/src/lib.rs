//! Roster - View State
//!
//! Platform-agnostic state for the users screen: a root view that owns the
//! user snapshot, a list display that renders it, and a creation form.
//!
//! This crate provides:
//! - Fetch on mount, with a visible error state when the read fails
//! - Last-issued-wins reads: a superseded read never overwrites newer data
//! - Creation with local validation and at most one request in flight
//! - Merge of the created user plus a refresh read
//! - Teardown that cancels in-flight work and rejects later updates
//!
//! # Architecture
//!
//! `roster-view` performs no I/O itself:
//! - [`RootView`] is a synchronous state machine. Transitions return
//!   [`Effects`]: events for the front end and [`Command`]s for I/O.
//! - [`ViewRuntime`] executes commands against any [`UsersApi`] on the
//!   caller's task and applies results in the order they resolve.
//!
//! Rendering produces plain data ([`RootRender`], [`ListRender`],
//! [`FormRender`]) that also implements `Display` for terminal front ends.
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::{DraftField, User, UserCollection};
//! use roster_view::{Command, RootView, ViewConfig};
//!
//! let mut view = RootView::new(ViewConfig::default());
//!
//! // Mount issues the initial read
//! let effects = view.mount().unwrap();
//! let Command::FetchUsers { token } = effects.commands[0].clone() else {
//!     unreachable!()
//! };
//!
//! // The driver performs the read and reports back
//! let users = UserCollection::from(vec![User::new(1, "Ana")]);
//! view.on_read_resolved(token, Ok(users)).unwrap();
//! assert_eq!(view.render().list.rows()[0].label, "Ana");
//!
//! // Submitting an empty draft issues nothing
//! view.edit(DraftField::Name, "").unwrap();
//! assert!(view.submit().unwrap().commands.is_empty());
//! ```
//!
//! [`UsersApi`]: roster_client::UsersApi

pub mod error;
pub mod events;
pub mod form;
pub mod list;
pub mod root;
pub mod runtime;
pub mod tracker;

pub use error::{FormError, Result, ViewError};
pub use events::ViewEvent;
pub use form::{CreationForm, FormRender};
pub use list::{ListRender, ListRow, UserListDisplay, EMPTY_MESSAGE};
pub use root::{Command, Effects, RootRender, RootView, ViewConfig};
pub use runtime::ViewRuntime;
pub use tracker::{ReadTracker, RequestToken, Resolution};
