//! Client error types.
//!
//! ERROR HANDLING
//! ==============
//! Network, backend and storage failures are typed here and converted to a
//! display string only at the UI boundary via [`ApiError::user_message`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown when a request fails without a backend-supplied reason.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Failure talking to the backend REST API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success HTTP status.
    #[error("request failed with status {status}")]
    Http { status: u16, message: Option<String> },

    /// The backend answered `status: false`.
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Called outside the browser (server render).
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// The backend's own explanation, when it sent one.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Http { message: Some(message), .. } | Self::Rejected { message } => {
                let trimmed = message.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Text suitable for an inline notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.backend_message().unwrap_or(GENERIC_FAILURE).to_owned()
    }

    /// Whether the backend rejected our credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

/// Failure writing to persistent browser storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
    #[error("serialize {key}: {reason}")]
    Serialize { key: String, reason: String },
}
