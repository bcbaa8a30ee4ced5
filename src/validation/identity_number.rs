//! Checksum validation for 11-digit identity numbers (CPF layout).
//!
//! The first nine digits carry the identity; the last two are verifiers,
//! each a weighted sum modulo 11 over the digits that precede it.

use super::{FieldError, ValidationOutcome};

const LENGTH: usize = 11;

/// Validate an identity number. Non-digit characters are ignored, so
/// `"529.982.247-25"` and `"52998224725"` are equivalent.
pub fn validate(value: &str) -> ValidationOutcome {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != LENGTH {
        return Err(FieldError::IdentityNumber);
    }

    // Repeated sequences satisfy the checksum but are never issued.
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(FieldError::IdentityNumber);
    }

    let first = verifier(&digits[..9]);
    let second = verifier(&digits[..10]);

    if first == digits[9] && second == digits[10] {
        Ok(())
    } else {
        Err(FieldError::IdentityNumber)
    }
}

/// Weights run from `len + 1` down to 2; results of 10 and 11 map to 0.
fn verifier(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match 11 - (sum % 11) {
        10 | 11 => 0,
        d => d,
    }
}
