use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use tracing::{debug, error, info, warn};

use super::collaborators::{Confirmation, ConfirmationPrompt, Notifier};
use super::postal_watch::PostalCodeWatch;
use super::{ClientForm, FormField};
use crate::db::ClientRepository;
use crate::error::ClientError;
use crate::lookup::AddressLookup;
use crate::models::{Address, ClientFieldsPatch};

pub const DISMISS_LABEL: &str = "OK";
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);

const LOAD_FAILED: &str = "Could not load the client.";
const SAVE_SUCCEEDED: &str = "Client saved successfully.";
const SAVE_FAILED: &str = "Could not save the client.";

/// Result of a single field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The edit did not call for a lookup.
    NotTriggered,
    /// The address block was replaced.
    Resolved(Address),
    /// The lookup failed; the form is untouched.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusChange {
    Activate,
    Deactivate,
}

impl StatusChange {
    pub fn target(self) -> bool {
        matches!(self, StatusChange::Activate)
    }

    pub fn action_label(self) -> &'static str {
        match self {
            StatusChange::Activate => "Activate",
            StatusChange::Deactivate => "Deactivate",
        }
    }

    fn question(self) -> &'static str {
        match self {
            StatusChange::Activate => "Do you want to activate the client",
            StatusChange::Deactivate => "Do you want to deactivate the client",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            StatusChange::Activate => "Could not activate the client.",
            StatusChange::Deactivate => "Could not deactivate the client.",
        }
    }

    fn error(self, source: anyhow::Error) -> ClientError {
        match self {
            StatusChange::Activate => ClientError::Activate(source),
            StatusChange::Deactivate => ClientError::Deactivate(source),
        }
    }
}

/// Parse the id carried by the navigation context. Anything that is not a
/// positive integer means "new client".
pub fn parse_route_id(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .filter(|id| *id > 0)
}

/// Owns the form state and runs every operation on it.
///
/// Each handler awaits its single outstanding call before touching the form
/// again, and is the final catcher for its own failures.
pub struct ClientFormController {
    repository: Arc<dyn ClientRepository>,
    lookup: Arc<dyn AddressLookup>,
    confirmation: Arc<dyn Confirmation>,
    notifier: Arc<dyn Notifier>,
    form: ClientForm,
    postal_watch: PostalCodeWatch,
}

impl ClientFormController {
    pub fn new(
        repository: Arc<dyn ClientRepository>,
        lookup: Arc<dyn AddressLookup>,
        confirmation: Arc<dyn Confirmation>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let form = ClientForm::default();
        let postal_watch = PostalCodeWatch::new(form.postal_code.clone());

        Self {
            repository,
            lookup,
            confirmation,
            notifier,
            form,
            postal_watch,
        }
    }

    pub fn form(&self) -> &ClientForm {
        &self.form
    }

    /// Start over on the record named by `route_id`, or on a new record.
    pub async fn open(&mut self, route_id: Option<&str>) -> Result<(), ClientError> {
        self.form = ClientForm::default();
        self.postal_watch.reset(&self.form.postal_code);

        match parse_route_id(route_id) {
            Some(id) => self.load(id).await,
            None => {
                debug!("no client id in route {:?}, starting a new client", route_id);
                Ok(())
            }
        }
    }

    pub async fn load(&mut self, id: i32) -> Result<(), ClientError> {
        let found = match self.repository.find_by_id(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(anyhow!("client {} not found", id)),
            Err(e) => Err(e),
        };

        match found {
            Ok(record) => {
                self.form.patch_record(&record);
                // Loading is not an edit; the loaded code must not trigger a lookup.
                self.postal_watch.reset(&self.form.postal_code);
                info!("loaded client {}", id);
                Ok(())
            }
            Err(source) => {
                error!("failed to load client {}: {:?}", id, source);
                self.notify(LOAD_FAILED);
                Err(ClientError::Load { id, source })
            }
        }
    }

    /// Apply one value change to `field`. Postal-code changes may resolve
    /// and overwrite the address block.
    pub async fn edit(&mut self, field: FormField, value: impl Into<String>) -> LookupOutcome {
        let value = value.into();

        if field != FormField::PostalCode {
            self.form.set(field, value);
            return LookupOutcome::NotTriggered;
        }

        let fire = self.postal_watch.observe(&value);
        self.form.set(FormField::PostalCode, value);
        if !fire {
            return LookupOutcome::NotTriggered;
        }

        let postal_code = self.form.postal_code.clone();
        debug!("postal code changed to {}, looking it up", postal_code);

        match self.lookup.lookup(&postal_code).await {
            Ok(address) => {
                self.form.patch_address(&address);
                self.postal_watch.reset(&self.form.postal_code);
                debug!("address resolved for {}: {:?}", postal_code, address);
                LookupOutcome::Resolved(address)
            }
            Err(err) => {
                warn!("address lookup for {} failed: {}", postal_code, err);
                LookupOutcome::Failed
            }
        }
    }

    /// Persist the form. Returns `Ok(None)` without side effects when the
    /// form is invalid, otherwise the id the record was saved under.
    pub async fn submit(&mut self) -> Result<Option<i32>, ClientError> {
        if !self.form.is_valid() {
            debug!("submit ignored, form has errors: {:?}", self.form.errors());
            return Ok(None);
        }

        let record = self.form.to_record();

        let saved = self
            .repository
            .save(&record)
            .await
            .and_then(|saved| saved.id.ok_or_else(|| anyhow!("storage returned no id")));

        match saved {
            Ok(id) => {
                self.form.id = Some(id);
                info!("saved client {}", id);
                self.notify(SAVE_SUCCEEDED);
                Ok(Some(id))
            }
            Err(source) => {
                error!("failed to save client: {:?}", source);
                self.notify(SAVE_FAILED);
                Err(ClientError::Save(source))
            }
        }
    }

    pub async fn activate(&mut self) -> Result<bool, ClientError> {
        self.change_status(StatusChange::Activate).await
    }

    pub async fn deactivate(&mut self) -> Result<bool, ClientError> {
        self.change_status(StatusChange::Deactivate).await
    }

    /// Ask for confirmation, persist the new status, then mirror it into the
    /// form. Returns whether the change was applied.
    pub async fn change_status(&mut self, change: StatusChange) -> Result<bool, ClientError> {
        let candidate = self.form.to_record();

        let prompt = ConfirmationPrompt {
            message: change.question().to_string(),
            subject_label: candidate.name.clone(),
            action_label: change.action_label().to_string(),
        };

        if self.confirmation.confirm(prompt).await != Some(true) {
            debug!("{} not confirmed", change.action_label());
            return Ok(false);
        }

        let target = change.target();
        let persisted = match candidate.id {
            Some(id) => self
                .repository
                .update_fields(id, &ClientFieldsPatch::status(target))
                .await
                .map(|()| id),
            None => Err(anyhow!("client has not been saved yet")),
        };

        match persisted {
            Ok(id) => {
                self.form.status = target;
                info!("client {} status set to {}", id, target);
                Ok(true)
            }
            Err(source) => {
                error!("failed to {} client: {:?}", change.action_label(), source);
                self.notify(change.failure_message());
                Err(change.error(source))
            }
        }
    }

    fn notify(&self, message: &str) {
        self.notifier.show(message, DISMISS_LABEL, NOTIFICATION_DURATION);
    }
}
