//! Uniform success/failure wrapper around the identity provider.
//!
//! Each operation makes the provider call(s) once and resolves to exactly one
//! [`AuthOutcome`]. Nothing is retried: a repeated registration request is
//! not safe to replay. Input is passed through unvalidated; the provider is
//! the authority on malformed email or password.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use super::provider::{IdentityProvider, ProviderFailure};
use super::types::AuthOutcome;
use crate::state::session::{SessionToken, Transition};

pub struct CredentialGateway<P> {
    provider: P,
}

impl<P: IdentityProvider> CredentialGateway<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Create an account, then fetch a fresh identity token for it.
    pub async fn register(&self, email: &str, password: &str) -> AuthOutcome {
        let result = self.register_inner(email, password).await;
        settle(Transition::Register, result)
    }

    /// Verify credentials and return the account's identity token.
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthOutcome {
        let result = self.authenticate_inner(email, password).await;
        settle(Transition::SignIn, result)
    }

    /// Sign out at the provider. Success carries the absent token.
    pub async fn end_session(&self) -> AuthOutcome {
        let result = self.provider.sign_out().await.map(|()| SessionToken::absent());
        settle(Transition::SignOut, result)
    }

    async fn register_inner(&self, email: &str, password: &str) -> Result<SessionToken, ProviderFailure> {
        let user = self.provider.create_account(email, password).await?;
        self.provider.id_token(&user).await
    }

    async fn authenticate_inner(&self, email: &str, password: &str) -> Result<SessionToken, ProviderFailure> {
        let user = self.provider.sign_in(email, password).await?;
        self.provider.id_token(&user).await
    }
}

fn settle(transition: Transition, result: Result<SessionToken, ProviderFailure>) -> AuthOutcome {
    let outcome = AuthOutcome::from(result);
    match &outcome {
        AuthOutcome::Success { .. } => log::debug!("{transition} accepted by provider"),
        AuthOutcome::Failure(err) => log::warn!("{transition} rejected by provider: {err}"),
    }
    outcome
}
