/// Length a postal code must have before it is looked up.
pub const POSTAL_CODE_LENGTH: usize = 8;

/// Decides when a postal-code edit warrants a lookup.
///
/// Only the immediately preceding raw value is remembered: a lookup fires
/// when the new value has [`POSTAL_CODE_LENGTH`] characters and differs from
/// the one before it.
#[derive(Debug, Clone, Default)]
pub struct PostalCodeWatch {
    previous: String,
}

impl PostalCodeWatch {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            previous: initial.into(),
        }
    }

    /// Record `next` and report whether it should be looked up.
    pub fn observe(&mut self, next: &str) -> bool {
        let fire = next.chars().count() == POSTAL_CODE_LENGTH && next != self.previous;
        self.previous.clear();
        self.previous.push_str(next);
        fire
    }

    /// Replace the remembered value without evaluating a transition.
    pub fn reset(&mut self, value: &str) {
        self.previous.clear();
        self.previous.push_str(value);
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }
}
