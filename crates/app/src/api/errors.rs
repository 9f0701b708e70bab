//! API errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or a body that could not be decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}{}", detail(.message.as_deref()))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The stored bearer token could not be read.
    #[error("failed to read stored credentials")]
    Credentials(#[from] StorageError),
}

impl ApiError {
    /// Human readable message supplied by the backend, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Http(_) | Self::Credentials(_) => None,
        }
    }

    /// HTTP status of a rejected request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            Self::Credentials(_) => None,
        }
    }
}

fn detail(message: Option<&str>) -> String {
    message.map(|message| format!(": {message}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_backend_message() {
        let error = ApiError::Rejected {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "request failed with status 401: Invalid credentials"
        );
        assert_eq!(error.message(), Some("Invalid credentials"));
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn rejected_without_message() {
        let error = ApiError::Rejected {
            status: 500,
            message: None,
        };

        assert_eq!(error.to_string(), "request failed with status 500");
        assert_eq!(error.message(), None);
    }
}
