//! User list display
//!
//! Pure rendering of whatever collection it is handed. The only state it keeps
//! is presentational: which rows are expanded.

use roster_core::types::{User, UserCollection, UserId};
use std::collections::BTreeSet;
use std::fmt;

/// Text shown instead of rows when the collection is empty
pub const EMPTY_MESSAGE: &str = "No users yet.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Renders a `UserCollection` as rows keyed by user id
#[derive(Debug, Default)]
pub struct UserListDisplay {
    expanded: BTreeSet<UserId>,
}

/// Rendered list
#[derive(Debug, Clone, PartialEq)]
pub enum ListRender {
    /// Explicit empty state
    Empty { message: &'static str },
    /// One row per user, in collection order
    Rows(Vec<ListRow>),
}

/// One rendered user
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Stable identity of the row
    pub key: UserId,
    pub label: String,
    pub expanded: bool,
    /// Profile lines, only filled in for expanded rows
    pub details: Vec<String>,
}

impl UserListDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, users: &UserCollection) -> ListRender {
        if users.is_empty() {
            return ListRender::Empty {
                message: EMPTY_MESSAGE,
            };
        }

        ListRender::Rows(users.iter().map(|user| self.render_row(user)).collect())
    }

    fn render_row(&self, user: &User) -> ListRow {
        let expanded = self.expanded.contains(&user.id);
        ListRow {
            key: user.id.clone(),
            label: user.display_name(),
            expanded,
            details: if expanded {
                detail_lines(user)
            } else {
                Vec::new()
            },
        }
    }

    /// Flip a row between expanded and collapsed
    ///
    /// Returns the new state, or `None` if no user with that id is shown.
    pub fn toggle_expanded(&mut self, users: &UserCollection, id: &UserId) -> Option<bool> {
        if !users.contains(id) {
            return None;
        }

        if self.expanded.remove(id) {
            Some(false)
        } else {
            self.expanded.insert(id.clone());
            Some(true)
        }
    }

    pub fn is_expanded(&self, id: &UserId) -> bool {
        self.expanded.contains(id)
    }

    /// Drop expansion state for users that are no longer shown
    pub fn retain_present(&mut self, users: &UserCollection) {
        self.expanded.retain(|id| users.contains(id));
    }
}

fn detail_lines(user: &User) -> Vec<String> {
    let mut lines = vec![format!("id: {}", user.id)];

    if let Some(email) = &user.email {
        lines.push(format!("email: {}", email));
    }
    if let Some(active) = user.is_active {
        lines.push(format!("active: {}", if active { "yes" } else { "no" }));
    }
    if let Some(raw) = &user.created_at {
        lines.push(format!("created: {}", timestamp(raw, user.created_at_utc())));
    }
    if let Some(raw) = &user.last_login {
        lines.push(format!("last login: {}", timestamp(raw, user.last_login_utc())));
    }
    if !user.roles.is_empty() {
        let roles: Vec<&str> = user.roles.iter().map(|role| role.name.as_str()).collect();
        lines.push(format!("roles: {}", roles.join(", ")));
    }
    for (key, value) in &user.extra {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("{}: {}", key, value));
    }

    lines
}

fn timestamp(raw: &str, parsed: Option<chrono::DateTime<chrono::Utc>>) -> String {
    parsed
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

impl ListRender {
    /// Row keys in display order (empty for the empty state)
    pub fn keys(&self) -> Vec<&UserId> {
        match self {
            ListRender::Empty { .. } => Vec::new(),
            ListRender::Rows(rows) => rows.iter().map(|row| &row.key).collect(),
        }
    }

    pub fn rows(&self) -> &[ListRow] {
        match self {
            ListRender::Empty { .. } => &[],
            ListRender::Rows(rows) => rows,
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, ListRender::Empty { .. })
    }
}

impl fmt::Display for ListRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListRender::Empty { message } => writeln!(f, "  {}", message),
            ListRender::Rows(rows) => {
                for row in rows {
                    let marker = if row.expanded { 'v' } else { '>' };
                    writeln!(f, "  {} [{}] {}", marker, row.key, row.label)?;
                    for line in &row.details {
                        writeln!(f, "      {}", line)?;
                    }
                }
                Ok(())
            }
        }
    }
}
