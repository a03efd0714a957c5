//! Form state as an immutable record plus a pure reducer.
//!
//! Side effects (network, timers, storage) live in
//! [`FormController`](crate::form_controller::FormController); this module only
//! describes how each event turns one state into the next.

use crate::email_check::is_valid_email;
use crate::error::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered";

/// A flat-or-nested record edited through string fields addressed by dotted
/// paths such as `"address.geo.lat"`.
pub trait FormRecord:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Singular entity name for messages ("user", "post").
    const ENTITY: &'static str;

    /// Local store key for the create-form draft.
    const DRAFT_KEY: &'static str;

    /// `(path, message)` pairs checked for non-blank values on submit.
    const REQUIRED: &'static [(&'static str, &'static str)];

    /// Every editable path.
    const FIELDS: &'static [&'static str];

    /// How long the "Draft saved" notice stays up.
    const DRAFT_SAVED_TTL_MS: i64 = 3000;

    /// The empty create form.
    fn template() -> Self {
        Self::default()
    }

    /// The fixed "load default dataset" record.
    fn sample() -> Self;

    /// Fills in defaults for a record fetched from the server.
    fn normalize_loaded(self) -> Self {
        self
    }

    fn field(&self, path: &str) -> Option<&str>;

    fn field_mut(&mut self, path: &str) -> Option<&mut String>;

    /// Path of the email field subject to shape and uniqueness checks.
    fn email_path() -> Option<&'static str> {
        None
    }

    fn email(&self) -> Option<&str> {
        Self::email_path().and_then(|path| self.field(path))
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (path, message) in Self::REQUIRED {
            if self.field(path).map_or(true, |v| v.trim().is_empty()) {
                errors.insert((*path).to_string(), (*message).to_string());
            }
        }
        if let (Some(path), Some(email)) = (Self::email_path(), self.email()) {
            if !errors.contains_key(path) && !is_valid_email(email) {
                errors.insert(path.to_string(), "Email is invalid".to_string());
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Bound to a server record; submit issues a PATCH.
    Edit { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailCheck {
    Idle,
    Pending(String),
    Available,
    Taken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent<R> {
    FieldChanged { path: String, value: String },
    SampleLoaded(R),
    Loaded { id: i64, record: R },
    DraftRestored(R),
    DraftSaved { at: DateTime<Utc> },
    Validated(FieldErrors),
    EmailCheckStarted(String),
    EmailCheckFinished { email: String, taken: bool },
    EmailUnchanged,
    SubmitStarted,
    SubmitSucceeded { id: i64 },
    SubmitFailed,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<R> {
    pub record: R,
    /// What `Reset` restores: the template, or the last server copy.
    pub snapshot: R,
    pub mode: FormMode,
    pub errors: FieldErrors,
    pub dirty: bool,
    pub submitting: bool,
    pub email_check: EmailCheck,
    pub last_saved: Option<DateTime<Utc>>,
}

impl<R: FormRecord> FormState<R> {
    pub fn create() -> Self {
        let template = R::template();
        Self {
            record: template.clone(),
            snapshot: template,
            mode: FormMode::Create,
            errors: FieldErrors::new(),
            dirty: false,
            submitting: false,
            email_check: EmailCheck::Idle,
            last_saved: None,
        }
    }

    pub fn edit(id: i64, record: R) -> Self {
        Self::create().apply(FormEvent::Loaded { id, record })
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn bound_id(&self) -> Option<i64> {
        match self.mode {
            FormMode::Edit { id } => Some(id),
            FormMode::Create => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn apply(mut self, event: FormEvent<R>) -> Self {
        match event {
            FormEvent::FieldChanged { path, value } => {
                let Some(slot) = self.record.field_mut(&path) else {
                    return self;
                };
                *slot = value;
                self.dirty = true;
                if R::email_path() == Some(path.as_str()) {
                    self.email_check = EmailCheck::Idle;
                }
                self.errors.remove(&path);
            }
            FormEvent::SampleLoaded(record) => {
                self.record = record;
                self.errors.clear();
                self.email_check = EmailCheck::Idle;
                self.dirty = true;
            }
            FormEvent::Loaded { id, record } => {
                let record = record.normalize_loaded();
                self.mode = FormMode::Edit { id };
                self.snapshot = record.clone();
                self.record = record;
                self.errors.clear();
                self.email_check = EmailCheck::Idle;
                self.dirty = false;
            }
            FormEvent::DraftRestored(record) => {
                self.record = record;
                self.errors.clear();
                self.email_check = EmailCheck::Idle;
                self.dirty = false;
            }
            FormEvent::DraftSaved { at } => {
                self.last_saved = Some(at);
                self.dirty = false;
            }
            FormEvent::Validated(errors) => {
                self.errors = errors;
            }
            FormEvent::EmailCheckStarted(email) => {
                self.email_check = EmailCheck::Pending(email);
            }
            FormEvent::EmailCheckFinished { email, taken } => {
                // A result for an address that has since been edited is stale.
                if self.record.email() != Some(email.as_str()) {
                    return self;
                }
                if taken {
                    self.email_check = EmailCheck::Taken;
                    if let Some(path) = R::email_path() {
                        self.errors
                            .insert(path.to_string(), EMAIL_TAKEN_MESSAGE.to_string());
                    }
                } else {
                    self.email_check = EmailCheck::Available;
                }
            }
            FormEvent::EmailUnchanged => {
                self.email_check = EmailCheck::Available;
            }
            FormEvent::SubmitStarted => {
                self.submitting = true;
            }
            FormEvent::SubmitSucceeded { id } => {
                self.submitting = false;
                self.dirty = false;
                self.mode = FormMode::Edit { id };
                self.snapshot = self.record.clone();
            }
            FormEvent::SubmitFailed => {
                self.submitting = false;
            }
            FormEvent::Reset => {
                self.record = self.snapshot.clone();
                self.errors.clear();
                self.email_check = EmailCheck::Idle;
                self.dirty = false;
            }
        }
        self
    }
}
