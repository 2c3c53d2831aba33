//! API Errors
//!
//! Typed failures raised at the client boundary.

use thiserror::Error;

/// Common result type for remote operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a remote call or of client-side validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received
    #[error("network failure: {0}")]
    Network(String),
    /// Session missing or expired (401); the user has to sign in again
    #[error("unauthorized")]
    Unauthorized(Option<String>),
    /// Authenticated but not allowed (403)
    #[error("forbidden")]
    Forbidden(Option<String>),
    /// Any other 4xx/5xx response
    #[error("http {status}")]
    Http { status: u16, message: Option<String> },
    /// Rejected locally before any request was issued
    #[error("validation failed: {0}")]
    Validation(String),
    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Response arrived after a newer request for the same collection
    #[error("stale response discarded")]
    Stale,
}

impl ApiError {
    /// Classify an HTTP status with the optional server-supplied message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            _ => ApiError::Http { status, message },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Message to show the user. Server text wins, then the validation
    /// text, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized(Some(msg))
            | ApiError::Forbidden(Some(msg))
            | ApiError::Http { message: Some(msg), .. }
            | ApiError::Validation(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies() {
        assert!(ApiError::from_status(401, None).is_unauthorized());
        assert_eq!(ApiError::from_status(403, None), ApiError::Forbidden(None));
        assert_eq!(
            ApiError::from_status(500, Some("boom".into())),
            ApiError::Http { status: 500, message: Some("boom".into()) }
        );
    }

    #[test]
    fn test_blank_server_message_is_dropped() {
        let err = ApiError::from_status(400, Some("   ".into()));
        assert_eq!(err.user_message("Gagal"), "Gagal");
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::from_status(409, Some("Period already active".into()));
        assert_eq!(err.user_message("Gagal"), "Period already active");
        assert_eq!(ApiError::Network("timeout".into()).user_message("Gagal"), "Gagal");
        assert_eq!(ApiError::Validation("Alasan wajib diisi".into()).user_message("x"), "Alasan wajib diisi");
    }
}
