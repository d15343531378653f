//! Root view
//!
//! Owns the canonical snapshot of the user collection and composes the list
//! display and the creation form. Every operation is synchronous: work that
//! needs the network is returned as [`Command`]s for a driver to execute, and
//! the driver feeds results back through `on_read_resolved` and
//! `on_create_resolved`.

use crate::error::{FormError, Result, ViewError};
use crate::events::ViewEvent;
use crate::form::{CreationForm, FormRender};
use crate::list::{ListRender, UserListDisplay};
use crate::tracker::{ReadTracker, RequestToken, Resolution};
use roster_client::ClientError;
use roster_core::types::{DraftField, MergeOutcome, NewUser, User, UserCollection, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Root view configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Re-read the collection after a successful create, even when the
    /// created user was merged from the response
    #[serde(default = "default_refresh_after_create")]
    pub refresh_after_create: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            refresh_after_create: default_refresh_after_create(),
        }
    }
}

fn default_refresh_after_create() -> bool {
    true
}

/// I/O requested by a view transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET /users/`; resolve with `on_read_resolved(token, ..)`
    FetchUsers { token: RequestToken },
    /// `POST /users/`; resolve with `on_create_resolved(..)`
    CreateUser { user: NewUser },
}

/// Outcome of a view transition
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Effects {
    pub events: Vec<ViewEvent>,
    pub commands: Vec<Command>,
}

impl Effects {
    fn event(event: ViewEvent) -> Self {
        Self {
            events: vec![event],
            commands: Vec::new(),
        }
    }
}

/// Root view state
#[derive(Debug, Default)]
pub struct RootView {
    config: ViewConfig,
    tracker: ReadTracker,
    users: UserCollection,
    list: UserListDisplay,
    form: CreationForm,
    read_error: Option<String>,
    mounted: bool,
}

/// Rendered root view
#[derive(Debug, Clone, PartialEq)]
pub struct RootRender {
    /// The latest read has not resolved yet
    pub loading: bool,
    pub list: ListRender,
    /// Visible message for the latest failed read
    pub read_error: Option<String>,
    pub form: FormRender,
}

impl RootView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current snapshot
    pub fn users(&self) -> &UserCollection {
        &self.users
    }

    pub fn form(&self) -> &CreationForm {
        &self.form
    }

    pub fn read_error(&self) -> Option<&str> {
        self.read_error.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_torn_down(&self) -> bool {
        self.tracker.is_torn_down()
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    /// Mount the view: issues the initial read. Only allowed once.
    pub fn mount(&mut self) -> Result<Effects> {
        self.ensure_alive()?;
        if self.mounted {
            return Err(ViewError::AlreadyMounted);
        }

        self.mounted = true;
        debug!("Root view mounted");
        Ok(self.issue_read(Effects::default()))
    }

    /// Re-read the collection (user-triggered retry)
    pub fn reload(&mut self) -> Result<Effects> {
        self.ensure_mounted()?;
        Ok(self.issue_read(Effects::default()))
    }

    /// Apply the result of the read behind `token`
    ///
    /// Results of superseded reads are discarded, failures included.
    pub fn on_read_resolved(
        &mut self,
        token: RequestToken,
        result: std::result::Result<UserCollection, ClientError>,
    ) -> Result<Effects> {
        self.ensure_alive()?;

        match self.tracker.resolve(token) {
            Resolution::Current => {}
            Resolution::Stale | Resolution::Unknown => {
                debug!(token = %token, "Discarding superseded read");
                return Ok(Effects::event(ViewEvent::StaleReadDiscarded { token }));
            }
        }

        match result {
            Ok(users) => {
                info!(token = %token, users = users.len(), "User snapshot replaced");
                let count = users.len();
                self.users = users;
                self.read_error = None;
                self.list.retain_present(&self.users);
                Ok(Effects::event(ViewEvent::SnapshotReplaced { token, count }))
            }
            Err(e) => {
                warn!(token = %token, error = %e, "Failed to load users");
                let message = format!("Could not load users: {}", e);
                self.read_error = Some(message.clone());
                Ok(Effects::event(ViewEvent::ReadFailed { token, message }))
            }
        }
    }

    /// Edit a form field
    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> Result<Effects> {
        self.ensure_alive()?;
        self.form.edit(field, value);
        Ok(Effects::event(ViewEvent::DraftChanged { field }))
    }

    /// Submit the form
    ///
    /// A refused submit is not an error of the view: it is reported through
    /// events and visible form state, and issues no command.
    pub fn submit(&mut self) -> Result<Effects> {
        self.ensure_mounted()?;

        match self.form.submit() {
            Ok(user) => {
                debug!(name = %user.name, "Submitting new user");
                Ok(Effects {
                    events: vec![ViewEvent::SubmitStarted],
                    commands: vec![Command::CreateUser { user }],
                })
            }
            Err(FormError::Invalid(errors)) => {
                debug!(errors = errors.len(), "Draft failed validation");
                Ok(Effects::event(ViewEvent::ValidationFailed { errors }))
            }
            Err(FormError::SubmitInFlight) => {
                debug!("Submit ignored, request already in flight");
                Ok(Effects::event(ViewEvent::SubmitRejected))
            }
        }
    }

    /// Apply the result of the in-flight create request
    pub fn on_create_resolved(
        &mut self,
        result: std::result::Result<Option<User>, ClientError>,
    ) -> Result<Effects> {
        self.ensure_alive()?;
        if !self.form.is_submitting() {
            return Err(ViewError::NoSubmissionInFlight);
        }

        match result {
            Ok(created) => {
                self.form.succeeded();
                let mut effects = Effects::event(ViewEvent::UserCreated {
                    user: created.clone(),
                });

                let merged = created.is_some();
                if let Some(user) = created {
                    let id = user.id.clone();
                    let outcome = self.users.merge(user);
                    info!(id = %id, outcome = ?outcome, "Created user merged into snapshot");
                    effects.events.push(ViewEvent::UserMerged {
                        id,
                        appended: outcome == MergeOutcome::Appended,
                    });
                }

                // A read still in flight predates the creation; supersede it
                // so it cannot overwrite the merged snapshot.
                if !merged || self.config.refresh_after_create || self.tracker.is_loading() {
                    effects = self.issue_read(effects);
                }
                Ok(effects)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create user");
                let message = self.form.failed(&e);
                Ok(Effects::event(ViewEvent::CreateFailed {
                    message,
                    field_errors: e.field_errors().to_vec(),
                }))
            }
        }
    }

    /// Clear the form
    pub fn reset_form(&mut self) -> Result<Effects> {
        self.ensure_alive()?;
        match self.form.reset() {
            Ok(()) => Ok(Effects::event(ViewEvent::FormReset)),
            Err(_) => Ok(Effects::event(ViewEvent::SubmitRejected)),
        }
    }

    /// Expand or collapse a row; unknown ids change nothing
    pub fn toggle_row(&mut self, id: &UserId) -> Result<Effects> {
        self.ensure_alive()?;
        Ok(match self.list.toggle_expanded(&self.users, id) {
            Some(expanded) => Effects::event(ViewEvent::RowToggled {
                id: id.clone(),
                expanded,
            }),
            None => Effects::default(),
        })
    }

    /// Tear the view down; every later resolution is rejected
    pub fn teardown(&mut self) -> Effects {
        if self.tracker.is_torn_down() {
            return Effects::default();
        }

        let dropped = self.tracker.in_flight() + usize::from(self.form.is_submitting());
        self.tracker.teardown();
        debug!(dropped, "Root view torn down");
        Effects::event(ViewEvent::TornDown { dropped })
    }

    pub fn render(&self) -> RootRender {
        RootRender {
            loading: self.tracker.is_loading(),
            list: self.list.render(&self.users),
            read_error: self.read_error.clone(),
            form: self.form.render(),
        }
    }

    fn issue_read(&mut self, mut effects: Effects) -> Effects {
        let token = self.tracker.issue();
        debug!(token = %token, "Issuing users read");
        effects.events.push(ViewEvent::ReadIssued { token });
        effects.commands.push(Command::FetchUsers { token });
        effects
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.tracker.is_torn_down() {
            Err(ViewError::TornDown)
        } else {
            Ok(())
        }
    }

    fn ensure_mounted(&self) -> Result<()> {
        self.ensure_alive()?;
        if self.mounted {
            Ok(())
        } else {
            Err(ViewError::NotMounted)
        }
    }
}

impl fmt::Display for RootRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Users")?;
        if self.loading {
            writeln!(f, "  (loading...)")?;
        }
        if let Some(error) = &self.read_error {
            writeln!(f, "  ! {}", error)?;
        }
        write!(f, "{}", self.list)?;
        writeln!(f)?;
        writeln!(f, "New user")?;
        write!(f, "{}", self.form)
    }
}
