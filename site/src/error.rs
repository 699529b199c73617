//! Error types for the page layer

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    #[error("Invalid selector {selector:?}")]
    Selector { selector: String },

    #[error("ServiceWorker registration failed for {path}: {message}")]
    WorkerRegistration { path: String, message: String },
}

/// Failure reported by a form backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("Request rejected with status {status}")]
    Rejected { status: u16 },

    #[error("Network error: {0}")]
    Network(String),
}
