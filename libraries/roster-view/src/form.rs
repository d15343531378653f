//! User creation form
//!
//! Owns the draft until it is submitted. At most one create request is in
//! flight at a time; submit is refused while one is outstanding.

use crate::error::FormError;
use roster_client::ClientError;
use roster_core::types::{CreationDraft, DraftField, FieldError, NewUser};
use std::collections::BTreeMap;
use std::fmt;

/// Form state: draft, errors and the in-flight flag
#[derive(Debug, Default)]
pub struct CreationForm {
    draft: CreationDraft,
    field_errors: BTreeMap<DraftField, String>,
    error: Option<String>,
    /// Copy of the draft behind the in-flight request
    submitted: Option<CreationDraft>,
}

/// Rendered form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRender {
    pub name: String,
    pub email: String,
    pub field_errors: Vec<FieldError>,
    /// Form-level error message
    pub error: Option<String>,
    pub submitting: bool,
    pub submit_enabled: bool,
}

impl CreationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &CreationDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitted.is_some()
    }

    /// Error currently attached to a field
    pub fn field_error(&self, field: DraftField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Update one field of the draft; clears that field's error
    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.field_errors.remove(&field);
    }

    /// Validate the draft and mark a request as in flight
    ///
    /// On `Ok` the caller must issue exactly one create request with the
    /// returned body and report its outcome through [`Self::succeeded`] or
    /// [`Self::failed`].
    pub fn submit(&mut self) -> Result<NewUser, FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmitInFlight);
        }

        match self.draft.to_new_user() {
            Ok(new_user) => {
                self.field_errors.clear();
                self.error = None;
                self.submitted = Some(self.draft.clone());
                Ok(new_user)
            }
            Err(e) => {
                let errors = e.field_errors().to_vec();
                self.field_errors = errors
                    .iter()
                    .map(|err| (err.field, err.message.clone()))
                    .collect();
                self.error = None;
                Err(FormError::Invalid(errors))
            }
        }
    }

    /// The create request succeeded: discard the submitted draft
    ///
    /// Input typed while the request was in flight is kept.
    pub fn succeeded(&mut self) {
        if self.submitted.take().as_ref() == Some(&self.draft) {
            self.draft.clear();
        }
        self.field_errors.clear();
        self.error = None;
    }

    /// The create request failed: keep the draft and show why
    ///
    /// Returns the form-level message now on display.
    pub fn failed(&mut self, err: &ClientError) -> String {
        self.submitted = None;
        self.field_errors = err
            .field_errors()
            .iter()
            .map(|e| (e.field, e.message.clone()))
            .collect();
        let message = format!("Could not create user: {}", err);
        self.error = Some(message.clone());
        message
    }

    /// Discard the draft and every error
    pub fn reset(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmitInFlight);
        }

        self.draft.clear();
        self.field_errors.clear();
        self.error = None;
        Ok(())
    }

    pub fn render(&self) -> FormRender {
        FormRender {
            name: self.draft.get(DraftField::Name).to_string(),
            email: self.draft.get(DraftField::Email).to_string(),
            field_errors: self
                .field_errors
                .iter()
                .map(|(field, message)| FieldError::new(*field, message.clone()))
                .collect(),
            error: self.error.clone(),
            submitting: self.is_submitting(),
            submit_enabled: !self.is_submitting(),
        }
    }
}

impl fmt::Display for FormRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in [(DraftField::Name, &self.name), (DraftField::Email, &self.email)] {
            let required = if field.is_required() { "*" } else { "" };
            writeln!(f, "  {}{}: [{}]", field, required, value)?;
            if let Some(err) = self.field_errors.iter().find(|e| e.field == field) {
                writeln!(f, "    ! {}", err.message)?;
            }
        }
        if let Some(error) = &self.error {
            writeln!(f, "  ! {}", error)?;
        }
        if self.submitting {
            writeln!(f, "  (submitting...)")
        } else {
            writeln!(f, "  [submit]")
        }
    }
}
