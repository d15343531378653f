//! Operations on the `/users/` collection.

use crate::error::{ClientError, Result};
use crate::types::{ApiErrorBody, ErrorDetail};
use reqwest::{Client, Response, StatusCode};
use roster_core::types::{FieldError, NewUser, User, UserCollection};
use tracing::debug;

/// Users resource client.
pub struct UsersResource<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersResource<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    fn url(&self) -> String {
        format!("{}/users/", self.base_url)
    }

    /// Get the full user collection, in server order.
    pub async fn list(&self) -> Result<UserCollection> {
        let url = self.url();
        debug!(url = %url, "Fetching users");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            let users: UserCollection = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse users response: {}", e))
            })?;

            debug!(users = users.len(), "Fetched users");
            Ok(users)
        } else {
            Err(rejection(status, response).await)
        }
    }

    /// Create a user.
    ///
    /// A success response without a decodable user body is still a success;
    /// it yields `None`.
    pub async fn create(&self, user: &NewUser) -> Result<Option<User>> {
        let url = self.url();
        debug!(url = %url, name = %user.name, "Creating user");

        let response = self
            .http
            .post(&url)
            .json(user)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            return Err(rejection(status, response).await);
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!(status = status.as_u16(), "User created, empty response body");
            return Ok(None);
        }

        match serde_json::from_slice::<User>(&body) {
            Ok(created) => {
                debug!(id = %created.id, "User created");
                Ok(Some(created))
            }
            Err(e) => {
                debug!(error = %e, "User created, response carried no user");
                Ok(None)
            }
        }
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Turn a non-success response into an error, keeping whatever the server
/// said about it.
async fn rejection(status: StatusCode, response: Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();
    error_from_body(status, &body)
}

pub(crate) fn error_from_body(status: StatusCode, body: &str) -> ClientError {
    let code = status.as_u16();

    let detail = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) => {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body.trim().to_string()
            };
            return ClientError::ServerError {
                status: code,
                message,
            };
        }
    };

    match detail {
        ErrorDetail::Message(message) => ClientError::ServerError {
            status: code,
            message,
        },
        ErrorDetail::Issues(issues) => {
            let mut fields = Vec::new();
            let mut unattributed = Vec::new();
            for issue in issues {
                match issue.field() {
                    Some(field) => fields.push(FieldError::new(field, issue.msg)),
                    None => unattributed.push(format!("{}: {}", issue.location(), issue.msg)),
                }
            }

            if fields.is_empty() {
                ClientError::ServerError {
                    status: code,
                    message: unattributed.join("; "),
                }
            } else {
                ClientError::Validation {
                    status: code,
                    fields,
                    message: unattributed.join("; "),
                }
            }
        }
        ErrorDetail::Other(value) => ClientError::ServerError {
            status: code,
            message: value.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::types::DraftField;

    #[test]
    fn test_plain_text_body() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n");
        match err {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            e => panic!("Expected ServerError, got {:?}", e),
        }
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let err = error_from_body(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.to_string(), "Server error (503): Service Unavailable");
    }

    #[test]
    fn test_detail_message() {
        let err = error_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Email already registered"}"#,
        );
        assert_eq!(err.to_string(), "Server error (400): Email already registered");
    }

    #[test]
    fn test_validation_issues_split_by_field() {
        let err = error_from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address"},
                {"loc": ["body", "password"], "msg": "field required"}
            ]}"#,
        );

        match err {
            ClientError::Validation {
                status,
                fields,
                message,
            } => {
                assert_eq!(status, 422);
                assert_eq!(
                    fields,
                    vec![FieldError::new(
                        DraftField::Email,
                        "value is not a valid email address"
                    )]
                );
                assert_eq!(message, "body.password: field required");
            }
            e => panic!("Expected Validation, got {:?}", e),
        }
    }

    #[test]
    fn test_validation_issues_without_known_fields() {
        let err = error_from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#,
        );
        assert!(matches!(err, ClientError::ServerError { status: 422, .. }));
        assert!(err.to_string().contains("body: field required"));
    }
}
