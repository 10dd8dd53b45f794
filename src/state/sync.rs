//! Reconciles visible UI with the stored session token.
//!
//! DESIGN
//! ======
//! The page is driven through a typed [`UiPort`] instead of element lookups by
//! id, so the same rendering rules apply to the Leptos view and to test
//! doubles. The settled state is recomputed from the cookie store on every
//! `sync`; nothing else decides visibility.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use crate::state::session::{Credentials, UiState};
use crate::util::cookie::{CookieJar, SessionCookieStore};

/// Named accessors and mutators for the login page controls.
///
/// Logical ids: `email`, `password`, `login-box`, `authenticated-box`,
/// `alert`, and the `login` / `sign-up` / `logout-link` triggers.
pub trait UiPort {
    /// Current contents of the `email` and `password` fields.
    fn credentials(&self) -> Credentials;
    fn set_login_visible(&self, visible: bool);
    fn set_authenticated_visible(&self, visible: bool);
    /// Disable or re-enable the `login`, `sign-up`, and `logout-link` triggers.
    fn set_controls_disabled(&self, disabled: bool);
    fn show_alert(&self, message: &str);
    fn hide_alert(&self);
}

/// Renders [`UiState`] derived from a [`SessionCookieStore`] onto a [`UiPort`].
pub struct UiStateSynchronizer<'a, J, U> {
    store: &'a SessionCookieStore<J>,
    ui: &'a U,
}

impl<'a, J: CookieJar, U: UiPort> UiStateSynchronizer<'a, J, U> {
    pub fn new(store: &'a SessionCookieStore<J>, ui: &'a U) -> Self {
        Self { store, ui }
    }

    /// Settled state implied by the cookie right now.
    pub fn current(&self) -> UiState {
        UiState::from_token(&self.store.get_token())
    }

    /// Read the token and render the matching settled state.
    ///
    /// Must run once per page load and after any in-page transition.
    pub fn sync(&self) -> UiState {
        let state = self.current();
        self.apply(state);
        log::debug!("ui synced to {state:?}");
        state
    }

    /// Render `state`. `Pending` only disables triggers and keeps the current
    /// visibility so the form does not flicker mid-request.
    pub fn apply(&self, state: UiState) {
        match state {
            UiState::Authenticated => {
                self.ui.set_authenticated_visible(true);
                self.ui.set_login_visible(false);
                self.ui.set_controls_disabled(false);
            }
            UiState::Anonymous => {
                self.ui.set_authenticated_visible(false);
                self.ui.set_login_visible(true);
                self.ui.set_controls_disabled(false);
            }
            UiState::Pending => self.ui.set_controls_disabled(true),
        }
    }
}
