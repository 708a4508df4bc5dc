//! Field checks run before a signup is sent to the store.
//!
//! Everything here is pure: no store access, no logging.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::db::models::SignupDraft;

pub const NAME_MIN_CHARS: usize = 2;
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    UserType,
    Reason,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::UserType => "user_type",
            Field::Reason => "reason",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Required,
    TooShort,
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, kind: ValidationErrorKind) -> Self {
        let message = match (field, kind) {
            (Field::Name, ValidationErrorKind::Required) => "Name is required",
            (Field::Name, _) => "Name must be at least 2 characters",
            (Field::Email, ValidationErrorKind::Required) => "Email is required",
            (Field::Email, _) => "Please enter a valid email address",
            (Field::Phone, ValidationErrorKind::Required) => "Phone number is required",
            (Field::Phone, _) => "Please enter a valid phone number (10-15 digits)",
            (Field::UserType | Field::Reason, _) => "Invalid value",
        };
        FieldError { kind, message }
    }
}

/// Per-field validation errors. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.0.keys().map(Field::as_str).collect()
    }

    fn fail(&mut self, field: Field, kind: ValidationErrorKind) {
        self.0.insert(field, FieldError::new(field, kind));
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in &self.0 {
            map.serialize_entry(field.as_str(), error.message)?;
        }
        map.end()
    }
}

/// Validate a signup draft. `user_type` and `reason` never fail.
pub fn validate(draft: &SignupDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.fail(Field::Name, ValidationErrorKind::Required);
    } else if name.chars().count() < NAME_MIN_CHARS {
        errors.fail(Field::Name, ValidationErrorKind::TooShort);
    }

    if draft.email.trim().is_empty() {
        errors.fail(Field::Email, ValidationErrorKind::Required);
    } else if !validate_email(&draft.email) {
        errors.fail(Field::Email, ValidationErrorKind::InvalidFormat);
    }

    if draft.phone.trim().is_empty() {
        errors.fail(Field::Phone, ValidationErrorKind::Required);
    } else if !validate_phone(&draft.phone) {
        errors.fail(Field::Phone, ValidationErrorKind::InvalidFormat);
    }

    errors
}

/// Permissive `local@domain.tld` check: exactly one `@`, no whitespace, a
/// non-empty local part, and a dot in the domain with at least one character
/// on each side.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(is_form_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// The whitespace set the browser form uses: Unicode `White_Space` minus
/// U+0085, plus U+FEFF.
fn is_form_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Digit count after stripping every non-digit must be 10-15 inclusive.
pub fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}
