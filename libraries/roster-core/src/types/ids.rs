/// ID types for Roster entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned user identifier
///
/// Backends hand out either integers or strings (UUIDs). The form it arrived
/// in is kept, so an id serializes back exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Integer id (`{"id": 1}`)
    Numeric(i64),
    /// String id (`{"id": "6f1c..."}`)
    Text(String),
}

impl UserId {
    /// Whether the textual form of this id equals `raw`
    ///
    /// Front ends that take ids as typed text use this to find a row without
    /// guessing which variant the server used.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Numeric(n) => raw.trim().parse::<i64>().is_ok_and(|parsed| parsed == *n),
            Self::Text(s) => s == raw.trim(),
        }
    }

    /// Whether two ids name the same user, whatever wire form each arrived in
    ///
    /// `2` and `"2"` are the same user; `PartialEq` tells them apart.
    pub fn same_as(&self, other: &UserId) -> bool {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Numeric(_), Self::Text(text)) | (Self::Text(text), Self::Numeric(_)) => {
                self.matches(text) && other.matches(text)
            }
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_ids_deserialize() {
        let numeric: UserId = serde_json::from_str("7").unwrap();
        let text: UserId = serde_json::from_str("\"a1b2\"").unwrap();

        assert_eq!(numeric, UserId::Numeric(7));
        assert_eq!(text, UserId::Text("a1b2".to_string()));
    }

    #[test]
    fn test_id_keeps_wire_form() {
        assert_eq!(serde_json::to_string(&UserId::from(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&UserId::from("7")).unwrap(), "\"7\"");
    }

    #[test]
    fn test_same_as_ignores_wire_form() {
        assert!(UserId::from(2).same_as(&UserId::from("2")));
        assert!(UserId::from("2").same_as(&UserId::from(2)));
        assert!(UserId::from("abc").same_as(&UserId::from("abc")));
        assert!(!UserId::from(2).same_as(&UserId::from("3")));
        assert!(!UserId::from(2).same_as(&UserId::from("02x")));
        assert_ne!(UserId::from(2), UserId::from("2"));
    }

    #[test]
    fn test_matches_textual_form() {
        assert!(UserId::from(42).matches("42"));
        assert!(UserId::from(42).matches(" 42 "));
        assert!(!UserId::from(42).matches("042x"));
        assert!(UserId::from("abc").matches("abc"));
        assert!(!UserId::from("abc").matches("ABC"));
    }
}
