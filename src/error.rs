// SPDX-License-Identifier: MIT

//! Application error types with consistent user-facing classification.

/// Application error type.
///
/// Network and validation failures are caught at the operation boundary and
/// surfaced as transient notices; `AuthExpired`/`AccountInvalid` are the only
/// variants that force a session teardown.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Credential expired or unavailable")]
    AuthExpired,

    #[error("Account no longer valid")]
    AccountInvalid,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Required data not loaded yet")]
    NotReady,

    #[error("API error: {0}")]
    Api(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures the user may retry as a distinct action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Api(_))
    }

    /// True for failures that invalidate the whole session (forced logout).
    pub fn invalidates_session(&self) -> bool {
        matches!(self, AppError::AuthExpired | AppError::AccountInvalid)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts and connection errors are regular network failures.
        AppError::Network(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
