//! Client-side validation pass.
//!
//! One complete run over the form produces a [`ValidationErrors`] mapping.
//! Rules are evaluated independently per field; the first failing rule wins,
//! so a field carries at most one error message. Fields that pass are absent
//! from the mapping entirely.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::form::{Field, FormState};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Enter a valid email";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Min 6 characters";

/// Minimum password length accepted by the form.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Loose email shape: something, then `@`, then something, then `.`, then
/// something, with no whitespace or extra `@` anywhere.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Per-field validation errors from the most recent validation pass.
///
/// A field is present iff it failed; `get` returning `None` means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error message for a field, or `None` if it passed.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

/// Runs all per-field rules over the form and returns the failures.
///
/// Pure function of the form state: no side effects, idempotent. The
/// controller stores the result wholesale on each submit attempt; nothing
/// recomputes it on keystrokes.
pub fn validate(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !EMAIL_RE.is_match(&form.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if form.password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED);
    } else if form.password.chars().count() < PASSWORD_MIN_CHARS {
        errors.insert(Field::Password, PASSWORD_TOO_SHORT);
    }

    errors
}
