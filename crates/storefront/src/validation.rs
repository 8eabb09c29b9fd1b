//! Field-level form validation results.

use std::collections::BTreeMap;

use proscience_core::Email;
use serde::Serialize;

/// Field name to error message, in field-name order.
///
/// Forms are re-rendered with these messages next to the offending inputs,
/// and the JSON contact endpoint returns them as an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Record `message` when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    /// Require `value` and check it parses as an email address.
    pub fn require_email(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Email is required");
        } else if Email::parse(value).is_err() {
            self.add(field, "Email is invalid");
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The message for `field`, or an empty string.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    /// Field names with errors.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trims() {
        let mut errors = ValidationErrors::new();
        errors.require("city", "   ", "City is required");
        errors.require("state", "CA", "State is required");
        assert!(errors.has("city"));
        assert!(!errors.has("state"));
        assert_eq!(errors.get("city"), "City is required");
        assert_eq!(errors.get("state"), "");
    }

    #[test]
    fn test_require_email() {
        let mut errors = ValidationErrors::new();
        errors.require_email("blank", "");
        errors.require_email("bad", "not-an-email");
        errors.require_email("good", "jane@example.com");
        assert_eq!(errors.get("blank"), "Email is required");
        assert_eq!(errors.get("bad"), "Email is invalid");
        assert!(!errors.has("good"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["bad", "blank"]);
    }

    #[test]
    fn test_first_error_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), "first");
        assert_eq!(errors.len(), 1);
    }
}
