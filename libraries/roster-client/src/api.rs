//! The users API as seen by the view layer.

use crate::error::Result;
use async_trait::async_trait;
use roster_core::types::{NewUser, User, UserCollection};

/// Operations the view layer needs from the backend.
///
/// [`UsersClient`](crate::UsersClient) is the HTTP implementation. Tests of
/// the layers above use `MockUsersApi` (feature `mock`) or their own fakes.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Read the full user collection (`GET /users/`).
    async fn list_users(&self) -> Result<UserCollection>;

    /// Create a user (`POST /users/`).
    ///
    /// Returns the created user when the response carries one, `None` when
    /// the server only acknowledged the request.
    async fn create_user(&self, user: NewUser) -> Result<Option<User>>;
}
