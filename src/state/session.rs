//! Session data model shared by the cookie store, gateway, and controller.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;

/// Opaque identity token issued by the provider.
///
/// Never parsed or verified locally; the empty string is the canonical
/// absent value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The absent token, written to the cookie on sign-out.
    pub fn absent() -> Self {
        Self(String::new())
    }

    pub fn is_present(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            write!(f, "SessionToken(<{} bytes>)", self.0.len())
        } else {
            f.write_str("SessionToken(<absent>)")
        }
    }
}

/// Visible session state of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiState {
    /// No token: login form visible.
    #[default]
    Anonymous,
    /// Token present: authenticated controls visible.
    Authenticated,
    /// A transition is in flight: triggers are disabled.
    Pending,
}

impl UiState {
    /// Settled state implied by the stored token.
    pub fn from_token(token: &SessionToken) -> Self {
        if token.is_present() { Self::Authenticated } else { Self::Anonymous }
    }
}

/// User-triggered attempt to change session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Register,
    SignIn,
    SignOut,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Register => "register",
            Self::SignIn => "sign-in",
            Self::SignOut => "sign-out",
        })
    }
}

/// Email + password pair read from the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
