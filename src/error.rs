//! Error taxonomy for the contacts library.
//!
//! Validation problems stay inside the form. Remote problems are returned to
//! the list controller, which logs them and keeps its last good state.

use thiserror::Error;

use crate::models::ContactField;

/// A failed call to the remote contacts API.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} returned {status}")]
    Status {
        method: reqwest::Method,
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Bad or missing settings, reported before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API base URL configured; pass --api-url or set {0}")]
    MissingApiUrl(&'static str),
    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("invalid page size \"{0}\"; expected 5, 10 or 25")]
    InvalidPageSize(String),
    #[error("invalid timeout \"{0}\"; expected whole seconds")]
    InvalidTimeout(String),
}

/// A field-level problem found before a draft is submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: ContactField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("cannot edit a contact that has not been saved")]
    Unsaved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::new(ContactField::FirstName, "First name is required");
        assert_eq!(err.to_string(), "First Name: First name is required");
    }

    #[test]
    fn test_invalid_api_url_message() {
        let err = ConfigError::InvalidApiUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid API base URL \"nope\": relative URL without a base"
        );
    }
}
