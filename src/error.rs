//! Portal error type.
//!
//! ERROR HANDLING
//! ==============
//! Every operation returns `Result<_, PortalError>`. Errors are terminal to
//! the action that raised them; nothing is retried. Validation, login-gate
//! and decode failures are produced locally and never touch the network.

use crate::routing::Action;

/// Errors produced by portal client operations.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Required local input is missing or unusable.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend rejected the supplied credentials.
    #[error("authentication failed: status {status}")]
    Authentication { status: u16 },

    /// A gated action was attempted without a session.
    #[error("login required for {action}")]
    LoginRequired { action: Action },

    /// An authenticated call returned a non-success HTTP status.
    #[error("backend error: status {status}")]
    Backend { status: u16, body: String },

    /// A report payload could not be hex-decoded or parsed.
    #[error("report decode failed: {0}")]
    Decode(String),

    /// The backend could not be reached, or the call timed out.
    #[error("network error: {0}")]
    Network(String),

    /// A success response did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl PortalError {
    /// Stable, grepable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Authentication { .. } => "E_AUTHENTICATION",
            Self::LoginRequired { .. } => "E_LOGIN_REQUIRED",
            Self::Backend { .. } => "E_BACKEND",
            Self::Decode(_) => "E_DECODE",
            Self::Network(_) => "E_NETWORK",
            Self::InvalidResponse(_) => "E_INVALID_RESPONSE",
            Self::Config(_) => "E_CONFIG",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether the error was raised before any request left the client.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::LoginRequired { .. } | Self::Config(_) | Self::HttpClientBuild(_)
        )
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network(format!("request timed out: {e}"))
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
