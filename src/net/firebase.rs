//! Firebase Authentication over the Identity Toolkit REST API.
//!
//! Thin HTTP wrapper for `accounts:signUp` and `accounts:signInWithPassword`.
//! Response parsing lives in pure functions for testability. Sign-out is a
//! local operation, as in the Firebase web SDK: the cached current user, which
//! is also the source of identity tokens, is dropped.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Elsewhere: calls fail with `UNAVAILABLE` since the endpoints are only
//! reachable from the browser build.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::cell::RefCell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{IdentityProvider, ProviderFailure, ProviderUser};
use crate::config::FirebaseConfig;
use crate::state::session::SessionToken;

const SIGN_UP_ACTION: &str = "signUp";
const SIGN_IN_ACTION: &str = "signInWithPassword";

/// Code used when the provider could not be reached at all.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";
#[cfg(not(feature = "csr"))]
const UNAVAILABLE_CODE: &str = "UNAVAILABLE";
const NO_CURRENT_USER_CODE: &str = "NO_CURRENT_USER";

// =============================================================================
// CLIENT
// =============================================================================

pub struct FirebaseAuthClient {
    config: FirebaseConfig,
    current_user: RefCell<Option<ProviderUser>>,
}

impl FirebaseAuthClient {
    pub fn new(config: FirebaseConfig) -> Self {
        Self { config, current_user: RefCell::new(None) }
    }

    /// The account signed in through this client, if any.
    pub fn current_user(&self) -> Option<ProviderUser> {
        self.current_user.borrow().clone()
    }

    async fn password_call(&self, action: &str, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure> {
        let url = endpoint(self.config.identity_toolkit_url(), action, &self.config.api_key);
        let body = PasswordRequest { email, password, return_secure_token: true };
        let user = post_json(&url, &body).await?;
        *self.current_user.borrow_mut() = Some(user.clone());
        Ok(user)
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuthClient {
    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure> {
        self.password_call(SIGN_UP_ACTION, email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure> {
        self.password_call(SIGN_IN_ACTION, email, password).await
    }

    /// Token of the signed-in account, like `auth.currentUser.getIdToken()`.
    /// Fails unless `user` is the account this client last signed in.
    async fn id_token(&self, user: &ProviderUser) -> Result<SessionToken, ProviderFailure> {
        match self.current_user.borrow().as_ref() {
            Some(current) if current.uid == user.uid && current.id_token.is_present() => Ok(current.id_token.clone()),
            _ => Err(ProviderFailure::new(NO_CURRENT_USER_CODE, "no signed-in account matches this user")),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderFailure> {
        self.current_user.borrow_mut().take();
        Ok(())
    }
}

#[cfg(feature = "csr")]
async fn post_json(url: &str, body: &PasswordRequest<'_>) -> Result<ProviderUser, ProviderFailure> {
    let network = |e: gloo_net::Error| ProviderFailure::new(NETWORK_ERROR_CODE, e.to_string());
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    let ok = resp.ok();
    let status = resp.status();
    let text = resp.text().await.map_err(network)?;
    if !ok {
        return Err(parse_error_response(status, &text));
    }
    parse_auth_response(&text)
}

#[cfg(not(feature = "csr"))]
async fn post_json(url: &str, body: &PasswordRequest<'_>) -> Result<ProviderUser, ProviderFailure> {
    let _ = (url, body);
    Err(ProviderFailure::new(UNAVAILABLE_CODE, "identity provider is only reachable from the browser"))
}

fn endpoint(base: &str, action: &str, api_key: &str) -> String {
    format!("{base}/accounts:{action}?key={api_key}")
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    id_token: String,
    local_id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_auth_response(json: &str) -> Result<ProviderUser, ProviderFailure> {
    let api: AuthResponse =
        serde_json::from_str(json).map_err(|e| ProviderFailure::new("INVALID_RESPONSE", e.to_string()))?;
    Ok(ProviderUser { uid: api.local_id, email: api.email, id_token: SessionToken::new(api.id_token) })
}

/// Turn an error body such as
/// `{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}`
/// into a failure whose code is the leading token of the message.
fn parse_error_response(status: u16, json: &str) -> ProviderFailure {
    match serde_json::from_str::<ErrorEnvelope>(json) {
        Ok(envelope) => {
            let message = envelope.error.message;
            let code = message.split(" : ").next().unwrap_or_default().trim().to_owned();
            ProviderFailure { code, message }
        }
        Err(_) => ProviderFailure::new(format!("HTTP_{status}"), json),
    }
}
