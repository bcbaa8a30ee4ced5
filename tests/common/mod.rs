#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;

use client_registry::db::ClientRepository;
use client_registry::form::{ClientFormController, Confirmation, ConfirmationPrompt, Notifier};
use client_registry::lookup::{AddressLookup, LookupError};
use client_registry::models::{Address, ClientFieldsPatch, ClientRecord};

pub const VALID_IDENTITY: &str = "52998224725";

#[derive(Debug, Clone, PartialEq)]
pub enum StorageCall {
    FindById(i32),
    Save(ClientRecord),
    UpdateFields(i32, ClientFieldsPatch),
}

#[derive(Default)]
pub struct FakeRepository {
    records: Mutex<HashMap<i32, ClientRecord>>,
    calls: Mutex<Vec<StorageCall>>,
    next_id: AtomicI32,
    pub fail_finds: AtomicBool,
    pub fail_saves: AtomicBool,
    pub fail_updates: AtomicBool,
}

impl FakeRepository {
    pub fn new(first_id: i32) -> Self {
        Self {
            next_id: AtomicI32::new(first_id),
            ..Self::default()
        }
    }

    pub fn insert(&self, record: ClientRecord) {
        let id = record.id.expect("seeded records carry an id");
        self.records.lock().unwrap().insert(id, record);
    }

    pub fn get(&self, id: i32) -> Option<ClientRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn remove(&self, id: i32) {
        self.records.lock().unwrap().remove(&id);
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientRepository for FakeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<ClientRecord>> {
        self.calls.lock().unwrap().push(StorageCall::FindById(id));
        if self.fail_finds.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(self.get(id))
    }

    async fn save(&self, record: &ClientRecord) -> Result<ClientRecord> {
        self.calls.lock().unwrap().push(StorageCall::Save(record.clone()));
        if self.fail_saves.load(Ordering::SeqCst) {
            bail!("duplicate identity number");
        }

        let id = match record.id {
            Some(id) if self.get(id).is_none() => bail!("client {} not found", id),
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        let saved = ClientRecord {
            id: Some(id),
            ..record.clone()
        };
        self.records.lock().unwrap().insert(id, saved.clone());
        Ok(saved)
    }

    async fn update_fields(&self, id: i32, fields: &ClientFieldsPatch) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(StorageCall::UpdateFields(id, fields.clone()));
        if self.fail_updates.load(Ordering::SeqCst) {
            bail!("connection reset");
        }

        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(&id) else {
            bail!("client {} not found", id);
        };
        if let Some(status) = fields.status {
            record.status = status;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLookup {
    addresses: Mutex<HashMap<String, Address>>,
    calls: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn with(self, address: Address) -> Self {
        self.addresses
            .lock()
            .unwrap()
            .insert(address.postal_code.replace('-', ""), address);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddressLookup for FakeLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        self.calls.lock().unwrap().push(postal_code.to_string());
        self.addresses
            .lock()
            .unwrap()
            .get(postal_code)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(postal_code.to_string()))
    }
}

pub struct FakeConfirmation {
    answer: Option<bool>,
    prompts: Mutex<Vec<ConfirmationPrompt>>,
}

impl FakeConfirmation {
    pub fn answering(answer: Option<bool>) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmation for FakeConfirmation {
    async fn confirm(&self, prompt: ConfirmationPrompt) -> Option<bool> {
        self.prompts.lock().unwrap().push(prompt);
        self.answer
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    shown: Mutex<Vec<(String, String, Duration)>>,
}

impl FakeNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _, _)| message.clone())
            .collect()
    }

    pub fn shown(&self) -> Vec<(String, String, Duration)> {
        self.shown.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    fn show(&self, message: &str, dismiss_label: &str, duration: Duration) {
        self.shown
            .lock()
            .unwrap()
            .push((message.to_string(), dismiss_label.to_string(), duration));
    }
}

pub struct Harness {
    pub repository: Arc<FakeRepository>,
    pub lookup: Arc<FakeLookup>,
    pub confirmation: Arc<FakeConfirmation>,
    pub notifier: Arc<FakeNotifier>,
    pub controller: ClientFormController,
}

impl Harness {
    pub fn new(lookup: FakeLookup, answer: Option<bool>) -> Self {
        let repository = Arc::new(FakeRepository::new(101));
        let lookup = Arc::new(lookup);
        let confirmation = Arc::new(FakeConfirmation::answering(answer));
        let notifier = Arc::new(FakeNotifier::default());

        let controller = ClientFormController::new(
            repository.clone(),
            lookup.clone(),
            confirmation.clone(),
            notifier.clone(),
        );

        Self {
            repository,
            lookup,
            confirmation,
            notifier,
            controller,
        }
    }
}

pub fn se_address() -> Address {
    Address {
        postal_code: "01001-000".to_string(),
        state: "SP".to_string(),
        city: "São Paulo".to_string(),
        district: "Sé".to_string(),
        street: "Praça da Sé".to_string(),
    }
}

pub fn centro_address() -> Address {
    Address {
        postal_code: "20040-002".to_string(),
        state: "RJ".to_string(),
        city: "Rio de Janeiro".to_string(),
        district: "Centro".to_string(),
        street: "Avenida Rio Branco".to_string(),
    }
}

pub fn stored_client(id: i32, status: bool) -> ClientRecord {
    ClientRecord {
        id: Some(id),
        name: "Bia".to_string(),
        identity_number: "11144477735".to_string(),
        status,
        email: Some("bia@example.com".to_string()),
        cellphone: None,
        postal_code: Some("01001000".to_string()),
        state: Some("SP".to_string()),
        city: Some("São Paulo".to_string()),
        district: Some("Sé".to_string()),
        street: Some("Praça da Sé".to_string()),
        number: Some("7".to_string()),
        birth_date: None,
    }
}
