use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A client as stored. `id` is `None` until the record has been saved once.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub identity_number: String,
    pub status: bool,
    pub email: Option<String>,
    pub cellphone: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Field-level update applied by `ClientRepository::update_fields`.
/// Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFieldsPatch {
    pub status: Option<bool>,
}

impl ClientFieldsPatch {
    pub fn status(status: bool) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
    }
}
