use std::{collections::BTreeMap, fmt};

use agrolead_shared::Locale;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use validator::ValidationErrors;

use crate::{Field, LeadFormType, StatusEvent, SubmissionStatus};

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Required,
    TooShort,
    InvalidEmail,
    InvalidChoice,
    Invalid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
}

impl FieldError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code, min: None }
    }

    pub fn required() -> Self {
        Self::new(ErrorCode::Required)
    }

    pub fn invalid_choice() -> Self {
        Self::new(ErrorCode::InvalidChoice)
    }

    pub fn too_short(min: u64) -> Self {
        Self {
            code: ErrorCode::TooShort,
            min: Some(min),
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        let key = format!("errors.{}", self.code.as_ref());
        match self.min {
            Some(min) => rust_i18n::t!(key, locale = locale.as_ref(), min = min).into_owned(),
            None => rust_i18n::t!(key, locale = locale.as_ref()).into_owned(),
        }
    }
}

/// Validation failures keyed by the field that failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<FieldError>>);

impl FieldErrors {
    pub fn add(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_default().push(error);
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, errors) in other.0 {
            self.0.entry(field).or_default().extend(errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: Field) -> Option<&[FieldError]> {
        self.0.get(&field).map(Vec::as_slice)
    }

    pub fn first(&self, field: Field) -> Option<&FieldError> {
        self.get(field).and_then(|errors| errors.first())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// First message of every failing field, in the requested language.
    pub fn localize(&self, locale: Locale) -> BTreeMap<Field, String> {
        self.0
            .iter()
            .filter_map(|(field, errors)| {
                errors
                    .first()
                    .map(|error| (*field, error.message(locale)))
            })
            .collect()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FieldErrors::default();
        for (name, failures) in value.field_errors() {
            let name: &str = name.as_ref();
            let Some(field) = Field::from_rule(name) else {
                tracing::warn!(rule = name, "validation rule without a matching field");
                continue;
            };
            for failure in failures.iter() {
                errors.add(
                    field,
                    FieldError {
                        code: failure.code.parse().unwrap_or(ErrorCode::Invalid),
                        min: failure.params.get("min").and_then(|v| v.as_u64()),
                    },
                );
            }
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failing: Vec<String> = self
            .0
            .iter()
            .map(|(field, errors)| {
                let codes: Vec<&str> = errors.iter().map(|e| e.code.as_ref()).collect();
                format!("{field}: {}", codes.join("|"))
            })
            .collect();
        write!(f, "invalid fields: {}", failing.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("field {field} is not part of the {form_type} form")]
    FieldNotInForm {
        field: Field,
        form_type: LeadFormType,
    },

    #[error("{value:?} is not an option of {field}")]
    UnknownOption { field: Field, value: String },

    #[error("a submission is already in flight")]
    Busy,

    #[error("cannot {event} while {from}")]
    InvalidTransition {
        from: SubmissionStatus,
        event: StatusEvent,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("endpoint rejected the submission with status {status}")]
    Rejected { status: u16 },

    #[error("{0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::Timeout;
        }
        match value.status() {
            Some(status) => Self::Rejected {
                status: status.as_u16(),
            },
            None => Self::Transport(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_every_failure() {
        let mut errors = FieldErrors::default();
        errors.add(Field::Email, FieldError::new(ErrorCode::InvalidEmail));
        let mut other = FieldErrors::default();
        other.add(Field::Email, FieldError::required());
        other.add(Field::Country, FieldError::invalid_choice());
        errors.merge(other);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email).map(|e| e.len()), Some(2));
        assert_eq!(
            errors.first(Field::Country).map(|e| e.code),
            Some(ErrorCode::InvalidChoice)
        );
    }

    #[test]
    fn serializes_keyed_by_wire_name() {
        let mut errors = FieldErrors::default();
        errors.add(Field::FirstName, FieldError::too_short(2));
        let json = serde_json::to_value(&errors).expect("serializable");
        assert_eq!(json["firstName"][0]["code"], "too_short");
        assert_eq!(json["firstName"][0]["min"], 2);
    }

    #[test]
    fn localized_messages_follow_locale() {
        let mut errors = FieldErrors::default();
        errors.add(Field::Message, FieldError::too_short(10));
        let en = errors.localize(Locale::En);
        let fr = errors.localize(Locale::Fr);
        assert!(en[&Field::Message].contains("10"));
        assert_ne!(en[&Field::Message], fr[&Field::Message]);
    }
}
