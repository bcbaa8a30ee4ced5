//! Editable client form and the controller that drives it.

mod collaborators;
mod controller;
mod postal_watch;

pub use collaborators::{Confirmation, ConfirmationPrompt, Notifier};
pub use controller::{
    parse_route_id, ClientFormController, LookupOutcome, StatusChange, DISMISS_LABEL,
    NOTIFICATION_DURATION,
};
pub use postal_watch::{PostalCodeWatch, POSTAL_CODE_LENGTH};

use chrono::NaiveDate;

use crate::models::{Address, ClientRecord};
use crate::validation::{first_failure, FieldError, Rule, ValidationOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    IdentityNumber,
    Email,
    Cellphone,
    PostalCode,
    State,
    City,
    District,
    Street,
    Number,
    BirthDate,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Name,
        FormField::IdentityNumber,
        FormField::Email,
        FormField::Cellphone,
        FormField::PostalCode,
        FormField::State,
        FormField::City,
        FormField::District,
        FormField::Street,
        FormField::Number,
        FormField::BirthDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::IdentityNumber => "Identity number",
            FormField::Email => "Email",
            FormField::Cellphone => "Cellphone",
            FormField::PostalCode => "Postal code",
            FormField::State => "State",
            FormField::City => "City",
            FormField::District => "District",
            FormField::Street => "Street",
            FormField::Number => "Number",
            FormField::BirthDate => "Birth date",
        }
    }

    pub fn rules(self) -> &'static [Rule] {
        match self {
            FormField::Name => &[Rule::Required],
            FormField::IdentityNumber => &[
                Rule::Required,
                Rule::MinLength(11),
                Rule::MaxLength(11),
                Rule::IdentityNumber,
            ],
            FormField::Email => &[Rule::Email],
            FormField::PostalCode => &[
                Rule::MinLength(POSTAL_CODE_LENGTH),
                Rule::MaxLength(POSTAL_CODE_LENGTH),
                Rule::Digits,
            ],
            FormField::BirthDate => &[Rule::IsoDate],
            FormField::Cellphone
            | FormField::State
            | FormField::City
            | FormField::District
            | FormField::Street
            | FormField::Number => &[],
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw form values as the operator sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientForm {
    pub id: Option<i32>,
    pub name: String,
    pub identity_number: String,
    pub status: bool,
    pub email: String,
    pub cellphone: String,
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub street: String,
    pub number: String,
    pub birth_date: String,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            identity_number: String::new(),
            status: true,
            email: String::new(),
            cellphone: String::new(),
            postal_code: String::new(),
            state: String::new(),
            city: String::new(),
            district: String::new(),
            street: String::new(),
            number: String::new(),
            birth_date: String::new(),
        }
    }
}

impl ClientForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::IdentityNumber => &self.identity_number,
            FormField::Email => &self.email,
            FormField::Cellphone => &self.cellphone,
            FormField::PostalCode => &self.postal_code,
            FormField::State => &self.state,
            FormField::City => &self.city,
            FormField::District => &self.district,
            FormField::Street => &self.street,
            FormField::Number => &self.number,
            FormField::BirthDate => &self.birth_date,
        }
    }

    /// Postal-code edits must go through the controller so the watcher sees them.
    pub(crate) fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::IdentityNumber => &mut self.identity_number,
            FormField::Email => &mut self.email,
            FormField::Cellphone => &mut self.cellphone,
            FormField::PostalCode => &mut self.postal_code,
            FormField::State => &mut self.state,
            FormField::City => &mut self.city,
            FormField::District => &mut self.district,
            FormField::Street => &mut self.street,
            FormField::Number => &mut self.number,
            FormField::BirthDate => &mut self.birth_date,
        };
        *slot = value;
    }

    pub fn field_error(&self, field: FormField) -> ValidationOutcome {
        first_failure(field.rules(), self.value(field), self)
    }

    pub fn errors(&self) -> Vec<(FormField, FieldError)> {
        FormField::ALL
            .iter()
            .filter_map(|field| self.field_error(*field).err().map(|e| (*field, e)))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        FormField::ALL.iter().all(|field| self.field_error(*field).is_ok())
    }

    /// Copy every field of a stored record into the form.
    pub fn patch_record(&mut self, record: &ClientRecord) {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }

        self.id = record.id;
        self.name = record.name.clone();
        self.identity_number = record.identity_number.clone();
        self.status = record.status;
        self.email = text(&record.email);
        self.cellphone = text(&record.cellphone);
        self.postal_code = text(&record.postal_code);
        self.state = text(&record.state);
        self.city = text(&record.city);
        self.district = text(&record.district);
        self.street = text(&record.street);
        self.number = text(&record.number);
        self.birth_date = record
            .birth_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
    }

    /// Overwrite the whole address block. The looked-up postal code is kept
    /// as digits so it satisfies the field's own rules.
    pub fn patch_address(&mut self, address: &Address) {
        self.postal_code = address
            .postal_code
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        self.state = address.state.clone();
        self.city = address.city.clone();
        self.district = address.district.clone();
        self.street = address.street.clone();
    }

    /// Materialize the form as a record. Empty optional fields become `None`.
    pub fn to_record(&self) -> ClientRecord {
        fn optional(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        ClientRecord {
            id: self.id,
            name: self.name.trim().to_string(),
            identity_number: self.identity_number.clone(),
            status: self.status,
            email: optional(&self.email),
            cellphone: optional(&self.cellphone),
            postal_code: optional(&self.postal_code),
            state: optional(&self.state),
            city: optional(&self.city),
            district: optional(&self.district),
            street: optional(&self.street),
            number: optional(&self.number),
            birth_date: NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d").ok(),
        }
    }
}
