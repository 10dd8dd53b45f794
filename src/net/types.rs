//! Outcome and error taxonomy for identity-provider calls.
//!
//! ERROR HANDLING
//! ==============
//! Every variant keeps the provider's code and message verbatim. The
//! classification only decides how the controller reports the failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use super::provider::ProviderFailure;
use crate::state::session::SessionToken;

/// Classified failure of a gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown account or wrong password.
    #[error("invalid credentials ({code}): {message}")]
    InvalidCredentials { code: String, message: String },
    /// Registration of an identity that already exists.
    #[error("account already exists ({code}): {message}")]
    AccountConflict { code: String, message: String },
    /// The provider could not be reached.
    #[error("network failure ({code}): {message}")]
    NetworkFailure { code: String, message: String },
    /// Anything else, passed through.
    #[error("provider error ({code}): {message}")]
    ProviderError { code: String, message: String },
}

impl AuthError {
    /// Map a raw provider failure onto the taxonomy.
    ///
    /// Recognizes both Identity Toolkit REST codes (`EMAIL_EXISTS`) and JS SDK
    /// codes (`auth/email-already-in-use`).
    pub fn classify(failure: ProviderFailure) -> Self {
        let ProviderFailure { code, message } = failure;
        match code.as_str() {
            "INVALID_PASSWORD"
            | "EMAIL_NOT_FOUND"
            | "INVALID_LOGIN_CREDENTIALS"
            | "auth/wrong-password"
            | "auth/user-not-found"
            | "auth/invalid-credential"
            | "auth/invalid-login-credentials" => Self::InvalidCredentials { code, message },
            "EMAIL_EXISTS" | "auth/email-already-in-use" => Self::AccountConflict { code, message },
            "NETWORK_ERROR" | "auth/network-request-failed" => Self::NetworkFailure { code, message },
            _ => Self::ProviderError { code, message },
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::InvalidCredentials { code, .. }
            | Self::AccountConflict { code, .. }
            | Self::NetworkFailure { code, .. }
            | Self::ProviderError { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidCredentials { message, .. }
            | Self::AccountConflict { message, .. }
            | Self::NetworkFailure { message, .. }
            | Self::ProviderError { message, .. } => message.as_str(),
        }
    }
}

impl From<ProviderFailure> for AuthError {
    fn from(failure: ProviderFailure) -> Self {
        Self::classify(failure)
    }
}

/// Result of exactly one gateway operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The provider accepted the call. Sign-out carries the absent token.
    Success { token: SessionToken },
    Failure(AuthError),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert into a `Result` for `?` propagation.
    ///
    /// # Errors
    ///
    /// Returns the classified error of a `Failure` outcome.
    pub fn into_result(self) -> Result<SessionToken, AuthError> {
        match self {
            Self::Success { token } => Ok(token),
            Self::Failure(err) => Err(err),
        }
    }
}

impl From<Result<SessionToken, ProviderFailure>> for AuthOutcome {
    fn from(result: Result<SessionToken, ProviderFailure>) -> Self {
        match result {
            Ok(token) => Self::Success { token },
            Err(failure) => Self::Failure(AuthError::classify(failure)),
        }
    }
}
