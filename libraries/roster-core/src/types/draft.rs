/// Client-local draft of a user that has not been created yet
use crate::error::{CoreError, Result};
use serde::Serialize;
use std::fmt;

/// Maximum accepted length of a user name, in characters
pub const MAX_NAME_LEN: usize = 120;

/// Creatable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    Name,
    Email,
}

impl DraftField {
    pub const ALL: [DraftField; 2] = [DraftField::Name, DraftField::Email];

    /// Field name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Email => "email",
        }
    }

    /// Look a field up by its wire name
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    pub fn is_required(&self) -> bool {
        matches!(self, DraftField::Name)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem with one field of a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Form field values prior to submission
///
/// Values are stored exactly as typed. Trimming and validation happen in
/// [`CreationDraft::to_new_user`], so editing never loses keystrokes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationDraft {
    name: String,
    email: String,
}

impl CreationDraft {
    /// Current value of a field
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
        }
    }

    /// Replace the value of a field
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
        }
    }

    /// True when every field is blank
    pub fn is_blank(&self) -> bool {
        DraftField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every field, collecting all problems at once
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(DraftField::Name, "is required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                DraftField::Name,
                format!("must be at most {} characters", MAX_NAME_LEN),
            ));
        }

        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(FieldError::new(
                DraftField::Email,
                "must be a valid email address",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors))
        }
    }

    /// Validate and build the request body for `POST /users/`
    pub fn to_new_user(&self) -> Result<NewUser> {
        self.validate()?;

        let email = self.email.trim();
        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        })
    }
}

/// Request body for `POST /users/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn looks_like_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !value.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        _ => false,
    }
}
