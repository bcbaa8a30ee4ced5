use serde::{Deserialize, Serialize};

/// Location fields resolved from a postal code. Always applied as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub district: String,
    pub street: String,
}
