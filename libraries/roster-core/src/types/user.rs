/// User domain type
use super::UserId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user record as returned by the backend
///
/// Only `id` is guaranteed. Profile fields the client knows about are typed;
/// everything else the backend sends is kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    pub id: UserId,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Creation timestamp as sent by the server (ISO string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last login timestamp as sent by the server (ISO string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,

    /// Additional profile fields defined by the backend
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A role attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    #[serde(alias = "rol")]
    pub name: String,
}

impl User {
    /// Create a user with just an id and a name
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            email: None,
            is_active: None,
            created_at: None,
            last_login: None,
            roles: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Label shown for this user: name, then email, then the id
    pub fn display_name(&self) -> String {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.email.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Parsed creation time, if the server sent one we understand
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Parsed last login time, if the server sent one we understand
    pub fn last_login_utc(&self) -> Option<DateTime<Utc>> {
        self.last_login.as_deref().and_then(parse_timestamp)
    }
}

/// Parse a server timestamp
///
/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.f]` form that Python
/// backends emit for UTC datetimes without an offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
