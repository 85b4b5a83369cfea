//! List Errors
//!
//! Error taxonomy shared by every list view and form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when the server gives us nothing better
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors surfaced to list views and forms.
///
/// Cancellation is deliberately absent: a superseded request is a
/// [`crate::FetchOutcome::Cancelled`], never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ListError {
    /// Network or transport failure (no HTTP status)
    #[error("network error: {message}")]
    Transport { message: String },
    /// Non-2xx response
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    /// Client-side validation failure, blocks submission
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    /// Response body did not match any known envelope
    #[error("unexpected response: {message}")]
    Decode { message: String },
}

/// What the dismissible inline banner shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBanner {
    pub status: u16,
    pub message: String,
}

impl ListError {
    pub fn transport(message: impl Into<String>) -> Self {
        ListError::Transport { message: message.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ListError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ListError::Decode { message: message.into() }
    }

    /// Build a server error from a status and an optional response body.
    ///
    /// Uses the body's `message` field when present and non-blank.
    pub fn from_response(status: u16, body: Option<&serde_json::Value>) -> Self {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        ListError::Server { status, message }
    }

    /// HTTP status, 0 when the request never got a response
    pub fn status(&self) -> u16 {
        match self {
            ListError::Server { status, .. } => *status,
            ListError::Validation { .. } => 422,
            ListError::Transport { .. } | ListError::Decode { .. } => 0,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), 401 | 403)
    }

    pub fn banner(&self) -> ErrorBanner {
        let message = match self {
            ListError::Server { message, .. } => message.clone(),
            ListError::Validation { message, .. } => message.clone(),
            ListError::Transport { .. } | ListError::Decode { .. } => GENERIC_ERROR_MESSAGE.to_string(),
        };
        ErrorBanner {
            status: self.status(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_from_body() {
        let body = json!({ "message": "Role is still assigned" });
        let err = ListError::from_response(409, Some(&body));
        assert_eq!(err.banner(), ErrorBanner { status: 409, message: "Role is still assigned".into() });
    }

    #[test]
    fn test_fallback_message() {
        let body = json!({ "message": "   " });
        assert_eq!(ListError::from_response(500, Some(&body)).banner().message, GENERIC_ERROR_MESSAGE);
        assert_eq!(ListError::from_response(502, None).banner().message, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = ListError::transport("connection reset");
        assert_eq!(err.status(), 0);
        assert!(!err.is_auth_failure());
        assert!(ListError::from_response(401, None).is_auth_failure());
    }
}
