//! Field validation and the form submission seam

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::error::SubmitError;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SUBMIT_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Validate a field value, returning the error message for invalid input
pub fn validate_value(value: &str, field_type: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some(REQUIRED_MESSAGE)
    } else if field_type.eq_ignore_ascii_case("email") && !is_valid_email(value) {
        Some(INVALID_EMAIL_MESSAGE)
    } else {
        None
    }
}

/// Named values collected from a form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormSubmission {
    pub form_id: Option<String>,
    pub fields: BTreeMap<String, String>,
}

/// Outcome a transport reports for a submission, settled after a delay
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub settle_after: Duration,
    pub outcome: Result<(), SubmitError>,
}

pub trait FormTransport {
    fn submit(&mut self, submission: &FormSubmission) -> PendingSubmission;
}

/// Stand-in backend: accepts everything after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    pub delay: Duration,
    pub submitted: Vec<FormSubmission>,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
            submitted: Vec::new(),
        }
    }
}

impl FormTransport for SimulatedTransport {
    fn submit(&mut self, submission: &FormSubmission) -> PendingSubmission {
        self.submitted.push(submission.clone());
        PendingSubmission {
            settle_after: self.delay,
            outcome: Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("captain@seawater.io"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("captain@seawater"));
        assert!(!is_valid_email("captain seawater@io.com"));
        assert!(!is_valid_email("@seawater.io"));
    }

    #[test]
    fn test_validate_value() {
        assert_eq!(validate_value("   ", "text"), Some(REQUIRED_MESSAGE));
        assert_eq!(validate_value("", "email"), Some(REQUIRED_MESSAGE));
        assert_eq!(validate_value("nope", "email"), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(validate_value(" ok@waves.io ", "email"), None);
        assert_eq!(validate_value("nope", "text"), None);
    }

    #[test]
    fn test_simulated_transport() {
        let mut transport = SimulatedTransport::default();
        let pending = transport.submit(&FormSubmission::default());
        assert_eq!(pending.settle_after, Duration::from_secs(1));
        assert!(pending.outcome.is_ok());
        assert_eq!(transport.submitted.len(), 1);
    }
}
