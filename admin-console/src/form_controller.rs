use crate::debounce::Debouncer;
use crate::email_check::{
    is_valid_email, BlocklistCheck, UniquenessCheck, CREATE_CHECK_DELAY, EDIT_CHECK_DELAY,
};
use crate::error::{ConsoleError, FieldErrors, Result};
use crate::form::{
    EmailCheck, FormEvent, FormMode, FormRecord, FormState, EMAIL_TAKEN_MESSAGE,
};
use crate::list::Confirm;
use crate::records::{Navigate, RemoteRecord};
use crate::status::{StatusBar, StatusKind};
use crate::storage::KeyValueStore;
use admin_client::AdminClient;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(3000);

/// Timer expiries delivered back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheduled {
    AutosaveDue,
}

/// Drives a [`FormState`] through user events and their side effects.
///
/// Field changes in create mode (re)arm a debounced draft save; this needs a
/// tokio runtime, and the expiry is only acted on when the owner calls
/// [`run_scheduled`](Self::run_scheduled) or
/// [`process_scheduled`](Self::process_scheduled).
pub struct FormController<R: RemoteRecord> {
    client: AdminClient,
    store: Arc<dyn KeyValueStore>,
    checker: Arc<dyn UniquenessCheck>,
    state: FormState<R>,
    status: StatusBar,
    autosave: Debouncer,
    autosave_delay: Duration,
    scheduled_tx: mpsc::UnboundedSender<Scheduled>,
    scheduled_rx: mpsc::UnboundedReceiver<Scheduled>,
    drafts_saved: usize,
}

impl<R: RemoteRecord> FormController<R> {
    fn with_state(
        client: AdminClient,
        store: Arc<dyn KeyValueStore>,
        checker: Arc<dyn UniquenessCheck>,
        state: FormState<R>,
    ) -> Self {
        let (scheduled_tx, scheduled_rx) = mpsc::unbounded_channel();
        Self {
            client,
            store,
            checker,
            state,
            status: StatusBar::default(),
            autosave: Debouncer::new(),
            autosave_delay: AUTOSAVE_DELAY,
            scheduled_tx,
            scheduled_rx,
            drafts_saved: 0,
        }
    }

    /// An empty create form using the simulated blocklist check.
    pub fn create(client: AdminClient, store: Arc<dyn KeyValueStore>) -> Self {
        let checker = Arc::new(BlocklistCheck::with_delay(CREATE_CHECK_DELAY));
        Self::create_with_checker(client, store, checker)
    }

    pub fn create_with_checker(
        client: AdminClient,
        store: Arc<dyn KeyValueStore>,
        checker: Arc<dyn UniquenessCheck>,
    ) -> Self {
        Self::with_state(client, store, checker, FormState::create())
    }

    /// Loads record `id` into an edit form.
    pub async fn edit(client: AdminClient, store: Arc<dyn KeyValueStore>, id: i64) -> Result<Self> {
        let checker = Arc::new(BlocklistCheck::with_delay(EDIT_CHECK_DELAY));
        Self::edit_with_checker(client, store, checker, id).await
    }

    pub async fn edit_with_checker(
        client: AdminClient,
        store: Arc<dyn KeyValueStore>,
        checker: Arc<dyn UniquenessCheck>,
        id: i64,
    ) -> Result<Self> {
        match R::fetch(&client, id).await {
            Ok(record) => Ok(Self::with_state(
                client,
                store,
                checker,
                FormState::edit(id, record),
            )),
            Err(e) => {
                tracing::error!("Failed to load {} #{}: {}", R::ENTITY, id, e);
                Err(e.into())
            }
        }
    }

    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    pub fn state(&self) -> &FormState<R> {
        &self.state
    }

    pub fn record(&self) -> &R {
        &self.state.record
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    pub fn is_checking_email(&self) -> bool {
        matches!(self.state.email_check, EmailCheck::Pending(_))
    }

    /// The submit control is disabled while a submit is in flight.
    pub fn can_submit(&self) -> bool {
        !self.state.submitting
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn drafts_saved(&self) -> usize {
        self.drafts_saved
    }

    fn dispatch(&mut self, event: FormEvent<R>) {
        let state = std::mem::replace(&mut self.state, FormState::create());
        self.state = state.apply(event);
    }

    fn arm_autosave(&mut self) {
        if self.state.is_edit() || !self.state.dirty {
            return;
        }
        let tx = self.scheduled_tx.clone();
        self.autosave.schedule(self.autosave_delay, async move {
            let _ = tx.send(Scheduled::AutosaveDue);
        });
    }

    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> Result<()> {
        if !R::FIELDS.contains(&path) {
            return Err(ConsoleError::UnknownField(path.to_string()));
        }
        self.dispatch(FormEvent::FieldChanged {
            path: path.to_string(),
            value: value.into(),
        });
        self.arm_autosave();
        Ok(())
    }

    /// Fills the create form with the fixed sample record.
    pub fn load_sample(&mut self) {
        if self.state.is_edit() {
            return;
        }
        self.dispatch(FormEvent::SampleLoaded(R::sample()));
        self.status.info("Default dataset loaded");
        self.arm_autosave();
    }

    /// Persists the current record as the local draft. No network call.
    pub fn save_draft(&mut self) -> Result<()> {
        self.autosave.cancel();
        let json = serde_json::to_string(&self.state.record)?;
        self.store.set(R::DRAFT_KEY, &json)?;

        let now = Utc::now();
        self.dispatch(FormEvent::DraftSaved { at: now });
        self.drafts_saved += 1;
        let ttl = chrono::Duration::milliseconds(R::DRAFT_SAVED_TTL_MS);
        self.status
            .show_for(StatusKind::Info, "Draft saved", now, ttl);
        tracing::info!("Draft {} saved", R::ENTITY);
        Ok(())
    }

    /// Loads a previously saved draft into a create form.
    pub fn restore_draft(&mut self) -> Result<bool> {
        if self.state.is_edit() {
            return Ok(false);
        }
        let Some(raw) = self.store.get(R::DRAFT_KEY) else {
            return Ok(false);
        };
        let record: R = serde_json::from_str(&raw)?;
        self.dispatch(FormEvent::DraftRestored(record));
        self.status.info("Draft restored");
        Ok(true)
    }

    pub fn discard_draft(&mut self) -> Result<()> {
        self.store.remove(R::DRAFT_KEY)
    }

    /// Handles an expired timer if one is due, waiting for it when armed.
    /// Returns `false` when nothing is scheduled.
    pub async fn run_scheduled(&mut self) -> Result<bool> {
        let pending = self.autosave.is_pending();
        let event = match self.scheduled_rx.try_recv() {
            Ok(event) => event,
            Err(_) if pending => match self.scheduled_rx.recv().await {
                Some(event) => event,
                None => return Ok(false),
            },
            Err(_) => return Ok(false),
        };
        self.handle_scheduled(event)?;
        Ok(true)
    }

    /// Handles every timer that already fired, without waiting.
    pub fn process_scheduled(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Ok(event) = self.scheduled_rx.try_recv() {
            self.handle_scheduled(event)?;
            handled += 1;
        }
        Ok(handled)
    }

    fn handle_scheduled(&mut self, event: Scheduled) -> Result<()> {
        match event {
            Scheduled::AutosaveDue => {
                if self.state.dirty && !self.state.is_edit() {
                    self.save_draft()?;
                }
            }
        }
        Ok(())
    }

    /// Checks the record itself. A taken email keeps its message but does
    /// not make the record invalid; `submit` reports it separately.
    pub fn validate(&mut self) -> bool {
        let mut errors = self.state.record.validate();
        let valid = errors.is_empty();
        if self.state.email_check == EmailCheck::Taken {
            if let Some(path) = R::email_path() {
                errors
                    .entry(path.to_string())
                    .or_insert_with(|| EMAIL_TAKEN_MESSAGE.to_string());
            }
        }
        self.dispatch(FormEvent::Validated(errors));
        valid
    }

    /// Field lost focus. Only the email field reacts: a well-formed address
    /// is checked for uniqueness, except in edit mode when it is unchanged.
    pub async fn blur(&mut self, path: &str) {
        if R::email_path() != Some(path) {
            return;
        }
        let email = match self.state.record.email() {
            Some(email) if is_valid_email(email) => email.to_string(),
            _ => return,
        };

        if self.state.is_edit() && self.state.snapshot.email() == Some(email.as_str()) {
            self.dispatch(FormEvent::EmailUnchanged);
            return;
        }

        self.dispatch(FormEvent::EmailCheckStarted(email.clone()));
        let taken = self.checker.is_taken(&email).await;
        if taken {
            tracing::debug!("Email {} is already registered", email);
        }
        self.dispatch(FormEvent::EmailCheckFinished { email, taken });
    }

    /// Validates, then issues exactly one POST (create) or PATCH (edit).
    /// On failure the form keeps its contents, stays dirty and, in create
    /// mode, autosaves again after the usual quiet period.
    pub async fn submit(&mut self) -> Result<Navigate> {
        if self.state.submitting {
            return Err(ConsoleError::SubmitInFlight);
        }

        if !self.validate() {
            self.status.error("Please fix all errors");
            return Err(ConsoleError::Validation(self.state.errors.clone()));
        }
        if self.state.email_check == EmailCheck::Taken {
            self.status.error("Fix email validation errors");
            return Err(ConsoleError::EmailTaken);
        }

        self.autosave.cancel();
        self.dispatch(FormEvent::SubmitStarted);

        let entity = capitalize(R::ENTITY);
        let result = match self.state.mode {
            FormMode::Create => R::create(&self.client, &self.state.record)
                .await
                .map(|id| (id, R::after_create(id))),
            FormMode::Edit { id } => R::update(&self.client, id, &self.state.record)
                .await
                .map(|_| (id, R::after_update(id))),
        };

        match result {
            Ok((id, navigate)) => {
                let created = !self.state.is_edit();
                self.dispatch(FormEvent::SubmitSucceeded { id });
                if created {
                    if let Err(e) = self.discard_draft() {
                        tracing::warn!("Failed to discard {} draft: {}", R::ENTITY, e);
                    }
                    self.status.success(format!("{} created successfully!", entity));
                } else {
                    self.status.success("Changes saved successfully!");
                }
                Ok(navigate)
            }
            Err(e) => {
                tracing::error!("Failed to save {}: {}", R::ENTITY, e);
                let action = if self.state.is_edit() { "updating" } else { "creating" };
                self.dispatch(FormEvent::SubmitFailed);
                self.status
                    .error(format!("Error {} {}!", action, R::ENTITY));
                // Still dirty: the draft timer picks up where submit stopped it.
                self.arm_autosave();
                Err(e.into())
            }
        }
    }

    /// Restores the template (create) or the last server copy (edit).
    pub fn reset(&mut self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm("Reset? Unsaved changes will be lost.") {
            return false;
        }
        self.autosave.cancel();
        self.dispatch(FormEvent::Reset);
        self.status.info("Form reset");
        true
    }

    /// Leaves edit mode. Asks first only if there are unsaved changes.
    pub fn cancel_edit(&mut self, confirm: &dyn Confirm) -> bool {
        if self.state.dirty && !confirm.confirm("You have unsaved changes. Cancel anyway?") {
            return false;
        }
        self.autosave.cancel();
        self.dispatch(FormEvent::Reset);
        true
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
