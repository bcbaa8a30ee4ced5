use super::{Document, Placement};
use crate::models::ClientRecord;

const LABEL_X: f32 = 15.0;
const LEADER_START_X: f32 = 62.0;
const LEADER_END_X: f32 = 98.0;
const VALUE_X: f32 = 100.0;
const FIRST_ROW_Y: f32 = 30.0;
const ROW_HEIGHT: f32 = 10.0;

/// Lay a client record out as label / leader / value rows.
pub fn client_sheet(record: &ClientRecord) -> Document {
    let mut doc = Document::new();

    let status = if record.status { "Active" } else { "Inactive" };
    let street = match (&record.street, &record.number) {
        (Some(street), Some(number)) => format!("{street}, {number}"),
        (Some(street), None) => street.clone(),
        (None, Some(number)) => number.clone(),
        (None, None) => String::new(),
    };
    let birth_date = record
        .birth_date
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_default();

    let rows: [(&str, String); 11] = [
        ("Code", record.id.map(|id| id.to_string()).unwrap_or_default()),
        ("Name", record.name.clone()),
        ("Identity number", record.identity_number.clone()),
        ("Status", status.to_string()),
        ("Email", record.email.clone().unwrap_or_default()),
        ("Cellphone", record.cellphone.clone().unwrap_or_default()),
        ("Birth date", birth_date),
        ("Postal code", record.postal_code.clone().unwrap_or_default()),
        ("Street", street),
        ("District", record.district.clone().unwrap_or_default()),
        (
            "City",
            match (&record.city, &record.state) {
                (Some(city), Some(state)) => format!("{city} - {state}"),
                (city, state) => city.clone().or_else(|| state.clone()).unwrap_or_default(),
            },
        ),
    ];

    for (row, (label, value)) in rows.iter().enumerate() {
        let y = FIRST_ROW_Y + row as f32 * ROW_HEIGHT;
        doc.add_label_and_value(&Placement::new((LABEL_X, y), (VALUE_X, y)), label, value);
        doc.add_dot(&Placement::new((LEADER_START_X, y), (LEADER_END_X, y)));
    }

    doc
}
