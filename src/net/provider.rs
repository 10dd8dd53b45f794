//! Identity-provider boundary.
//!
//! The provider is an opaque remote service (account store + credential
//! verifier + token issuer). It is injected into `CredentialGateway` rather
//! than held as a module-level client so tests can substitute a double.

use async_trait::async_trait;

use crate::state::session::SessionToken;

/// Raw provider failure: the provider's own error code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub code: String,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }
}

/// Account handle returned by sign-up and sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUser {
    pub uid: String,
    pub email: Option<String>,
    pub id_token: SessionToken,
}

/// Calls exposed by an identity SDK.
///
/// Futures are `!Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns the provider's failure when the account cannot be created.
    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure>;

    /// Verify credentials and sign the account in.
    ///
    /// # Errors
    ///
    /// Returns the provider's failure when verification fails.
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure>;

    /// Fetch a current identity token for `user`.
    ///
    /// # Errors
    ///
    /// Returns the provider's failure when no token can be issued.
    async fn id_token(&self, user: &ProviderUser) -> Result<SessionToken, ProviderFailure>;

    /// End the provider-side session.
    ///
    /// # Errors
    ///
    /// Returns the provider's failure when sign-out is refused.
    async fn sign_out(&self) -> Result<(), ProviderFailure>;
}
