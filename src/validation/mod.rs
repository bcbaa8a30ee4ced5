//! Field validation rules.
//!
//! Each rule is a pure check over the raw field text and a snapshot of the
//! whole form. Rules other than [`Rule::Required`] accept the empty value so
//! they can be combined freely.

pub mod identity_number;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::form::ClientForm;

pub type ValidationOutcome = Result<(), FieldError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("must have at least {required} characters")]
    MinLength { required: usize, actual: usize },
    #[error("must have at most {allowed} characters")]
    MaxLength { allowed: usize, actual: usize },
    #[error("invalid email")]
    Email,
    #[error("digits only")]
    Digits,
    #[error("invalid identity number")]
    IdentityNumber,
    #[error("expected a date as YYYY-MM-DD")]
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Digits,
    IdentityNumber,
    IsoDate,
}

const EMAIL_MAX: usize = 254;
const EMAIL_LOCAL_MAX: usize = 64;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

impl Rule {
    pub fn check(&self, value: &str, _form: &ClientForm) -> ValidationOutcome {
        if value.is_empty() {
            return match self {
                Rule::Required => Err(FieldError::Required),
                _ => Ok(()),
            };
        }

        let length = value.chars().count();
        match *self {
            Rule::Required => {
                if value.trim().is_empty() {
                    Err(FieldError::Required)
                } else {
                    Ok(())
                }
            }
            Rule::MinLength(required) if length < required => {
                Err(FieldError::MinLength { required, actual: length })
            }
            Rule::MaxLength(allowed) if length > allowed => {
                Err(FieldError::MaxLength { allowed, actual: length })
            }
            Rule::MinLength(_) | Rule::MaxLength(_) => Ok(()),
            Rule::Email => is_email(value).then_some(()).ok_or(FieldError::Email),
            Rule::Digits => value
                .chars()
                .all(|c| c.is_ascii_digit())
                .then_some(())
                .ok_or(FieldError::Digits),
            Rule::IdentityNumber => identity_number::validate(value),
            Rule::IsoDate => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| FieldError::Date),
        }
    }
}

fn is_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX {
        return false;
    }
    match value.split_once('@') {
        Some((local, _)) if local.len() <= EMAIL_LOCAL_MAX => EMAIL.is_match(value),
        _ => false,
    }
}

/// Run `rules` in order and report the first failure.
pub fn first_failure(rules: &[Rule], value: &str, form: &ClientForm) -> ValidationOutcome {
    rules.iter().try_for_each(|rule| rule.check(value, form))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ClientForm {
        ClientForm::default()
    }

    #[test]
    fn required_rejects_blank() {
        assert_eq!(Rule::Required.check("", &form()), Err(FieldError::Required));
        assert_eq!(Rule::Required.check("   ", &form()), Err(FieldError::Required));
        assert_eq!(Rule::Required.check("Ana", &form()), Ok(()));
    }

    #[test]
    fn length_rules_skip_empty_values() {
        assert_eq!(Rule::MinLength(8).check("", &form()), Ok(()));
        assert_eq!(Rule::MaxLength(8).check("", &form()), Ok(()));
    }

    #[test]
    fn length_rules_count_characters() {
        assert_eq!(
            Rule::MinLength(8).check("1234567", &form()),
            Err(FieldError::MinLength { required: 8, actual: 7 })
        );
        assert_eq!(
            Rule::MaxLength(8).check("123456789", &form()),
            Err(FieldError::MaxLength { allowed: 8, actual: 9 })
        );
        assert_eq!(Rule::MaxLength(3).check("ção", &form()), Ok(()));
    }

    #[test]
    fn email_accepts_common_addresses() {
        for value in ["ana@example.com", "a.b+c@mail.example.com.br", "x@localhost"] {
            assert_eq!(Rule::Email.check(value, &form()), Ok(()), "{value}");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for value in ["ana", "ana@", "@example.com", "ana@@example.com", "ana@-example.com"] {
            assert_eq!(Rule::Email.check(value, &form()), Err(FieldError::Email), "{value}");
        }
        let long_local = format!("{}@example.com", "a".repeat(65));
        assert_eq!(Rule::Email.check(&long_local, &form()), Err(FieldError::Email));
    }

    #[test]
    fn digits_and_dates() {
        assert_eq!(Rule::Digits.check("01001000", &form()), Ok(()));
        assert_eq!(Rule::Digits.check("01001-00", &form()), Err(FieldError::Digits));
        assert_eq!(Rule::IsoDate.check("1990-02-28", &form()), Ok(()));
        assert_eq!(Rule::IsoDate.check("28/02/1990", &form()), Err(FieldError::Date));
    }

    #[test]
    fn first_failure_stops_at_the_first_rule() {
        let rules = [Rule::Required, Rule::MinLength(11), Rule::IdentityNumber];
        assert_eq!(first_failure(&rules, "", &form()), Err(FieldError::Required));
        assert_eq!(
            first_failure(&rules, "123", &form()),
            Err(FieldError::MinLength { required: 11, actual: 3 })
        );
        assert_eq!(
            first_failure(&rules, "00000000000", &form()),
            Err(FieldError::IdentityNumber)
        );
        assert_eq!(first_failure(&rules, "52998224725", &form()), Ok(()));
    }
}
