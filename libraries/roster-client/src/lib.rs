//! Roster Client
//!
//! HTTP client library for the backend's users resource.
//!
//! # Features
//!
//! - **Read**: `GET {base_url}/users/` into a [`UserCollection`](roster_core::types::UserCollection)
//! - **Create**: `POST {base_url}/users/` from a validated draft
//! - **Errors**: transport failures, non-success statuses and structured
//!   validation rejections are all reported as [`ClientError`]
//! - **Seam**: [`UsersApi`] is what the view layer talks to, so it can be
//!   driven by a mock in tests (enable the `mock` feature for `MockUsersApi`)
//!
//! # Example
//!
//! ```ignore
//! use roster_client::{ClientConfig, UsersApi, UsersClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UsersClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//!     let users = client.list_users().await?;
//!     println!("Found {} users", users.len());
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod types;
mod users;

pub use api::UsersApi;
#[cfg(any(test, feature = "mock"))]
pub use api::MockUsersApi;
pub use client::UsersClient;
pub use error::{ClientError, Result};
pub use types::{ApiErrorBody, ClientConfig, ErrorDetail, ValidationIssue};
pub use users::UsersResource;
