//! Session state machine binding UI triggers to the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `login`, `sign-up`, and `logout-link` triggers call [`SessionController::on_sign_in`],
//! [`SessionController::on_register`], and [`SessionController::on_sign_out`]. Each runs one
//! transition:
//!
//! ```text
//! Anonymous --register/sign-in ok--> Authenticated
//! Authenticated --sign-out ok--> Anonymous
//! any --trigger--> Pending --failure--> (unchanged)
//! ```
//!
//! On success the cookie is written (or cleared) before navigating to the
//! home route. A full reload re-syncs the UI on the next page load; an
//! in-page navigation is followed by an explicit sync here.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned to the caller as [`TransitionError`] and reported
//! according to [`FailureReporting`]. Sign-in failures always collapse to one
//! generic alert so the message never reveals which field was wrong.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;

use crate::config::{FailureReporting, SessionConfig};
use crate::net::gateway::CredentialGateway;
use crate::net::provider::IdentityProvider;
use crate::net::types::{AuthError, AuthOutcome};
use crate::state::session::{Credentials, Transition, UiState};
use crate::state::sync::{UiPort, UiStateSynchronizer};
use crate::util::cookie::{CookieError, CookieJar, SessionCookieStore};
use crate::util::navigate::{Navigation, Navigator};

pub const SIGN_IN_FAILED_MESSAGE: &str = "Incorrect email or password. Please try again.";
pub const REGISTER_FAILED_MESSAGE: &str = "Could not create the account. Please try again.";
pub const SIGN_OUT_FAILED_MESSAGE: &str = "Sign out failed. Please try again.";

/// Why a transition did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Another transition is still pending; the trigger was ignored.
    #[error("{0} already in flight")]
    Busy(Transition),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Cookie(#[from] CookieError),
}

pub struct SessionController<P, J, U, N> {
    gateway: CredentialGateway<P>,
    store: SessionCookieStore<J>,
    ui: U,
    navigator: N,
    config: SessionConfig,
    in_flight: Cell<Option<Transition>>,
}

impl<P, J, U, N> SessionController<P, J, U, N>
where
    P: IdentityProvider,
    J: CookieJar,
    U: UiPort,
    N: Navigator,
{
    pub fn new(
        gateway: CredentialGateway<P>,
        store: SessionCookieStore<J>,
        ui: U,
        navigator: N,
        config: SessionConfig,
    ) -> Self {
        Self { gateway, store, ui, navigator, config, in_flight: Cell::new(None) }
    }

    pub fn synchronizer(&self) -> UiStateSynchronizer<'_, J, U> {
        UiStateSynchronizer::new(&self.store, &self.ui)
    }

    /// Page-load entry: render the state implied by the cookie.
    pub fn load(&self) -> UiState {
        self.synchronizer().sync()
    }

    /// `Pending` while a transition is in flight, otherwise derived from the cookie.
    pub fn state(&self) -> UiState {
        if self.in_flight.get().is_some() { UiState::Pending } else { self.synchronizer().current() }
    }

    pub fn gateway(&self) -> &CredentialGateway<P> {
        &self.gateway
    }

    pub fn store(&self) -> &SessionCookieStore<J> {
        &self.store
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// `sign-up` trigger: create an account from the form fields.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Busy`] while another transition is pending,
    /// otherwise the provider or cookie failure.
    pub async fn on_register(&self) -> Result<UiState, TransitionError> {
        let flight = self.begin(Transition::Register)?;
        let Credentials { email, password } = self.ui.credentials();
        let outcome = self.gateway.register(&email, &password).await;
        flight.finish(self.settle(Transition::Register, outcome))
    }

    /// `login` trigger: sign in with the form fields.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Busy`] while another transition is pending,
    /// otherwise the provider or cookie failure.
    pub async fn on_sign_in(&self) -> Result<UiState, TransitionError> {
        let flight = self.begin(Transition::SignIn)?;
        let Credentials { email, password } = self.ui.credentials();
        let outcome = self.gateway.authenticate(&email, &password).await;
        flight.finish(self.settle(Transition::SignIn, outcome))
    }

    /// `logout-link` trigger: end the provider session and clear the cookie.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Busy`] while another transition is pending,
    /// otherwise the provider failure.
    pub async fn on_sign_out(&self) -> Result<UiState, TransitionError> {
        let flight = self.begin(Transition::SignOut)?;
        let outcome = self.gateway.end_session().await;
        flight.finish(self.settle(Transition::SignOut, outcome))
    }

    /// Run the transition a trigger requests.
    ///
    /// # Errors
    ///
    /// Same as the matching `on_*` method.
    pub async fn trigger(&self, transition: Transition) -> Result<UiState, TransitionError> {
        match transition {
            Transition::Register => self.on_register().await,
            Transition::SignIn => self.on_sign_in().await,
            Transition::SignOut => self.on_sign_out().await,
        }
    }

    fn begin(&self, transition: Transition) -> Result<InFlight<'_, U>, TransitionError> {
        if let Some(active) = self.in_flight.get() {
            log::warn!("{transition} ignored: {active} still pending");
            return Err(TransitionError::Busy(active));
        }
        self.in_flight.set(Some(transition));
        self.ui.hide_alert();
        self.synchronizer().apply(UiState::Pending);
        Ok(InFlight { marker: &self.in_flight, ui: &self.ui, settled: false })
    }

    fn settle(&self, transition: Transition, outcome: AuthOutcome) -> Result<UiState, TransitionError> {
        let persisted = outcome.into_result().map_err(TransitionError::from).and_then(|token| match transition {
            Transition::SignOut => self.store.clear_token().map_err(TransitionError::from),
            Transition::Register | Transition::SignIn => self.store.set_token(&token).map_err(TransitionError::from),
        });
        if let Err(err) = persisted {
            self.report_failure(transition, &err);
            return Err(err);
        }

        let state = self.synchronizer().current();
        log::info!("{transition} succeeded, session is {state:?}");
        // The cookie is settled at this point; navigation may observe it.
        match self.navigator.navigate(&self.config.home_route) {
            Navigation::FullReload => {}
            Navigation::InPage => {
                self.synchronizer().sync();
            }
        }
        Ok(state)
    }

    fn report_failure(&self, transition: Transition, err: &TransitionError) {
        log::error!("{transition} failed: {err}");
        self.ui.set_controls_disabled(false);
        if let Some(message) = failure_alert(transition, self.config.failure_reporting) {
            self.ui.show_alert(message);
        }
    }
}

/// User-facing alert for a failed transition, if the policy surfaces one.
pub fn failure_alert(transition: Transition, policy: FailureReporting) -> Option<&'static str> {
    match (transition, policy) {
        (Transition::SignIn, _) => Some(SIGN_IN_FAILED_MESSAGE),
        (Transition::Register, FailureReporting::Unified) => Some(REGISTER_FAILED_MESSAGE),
        (Transition::SignOut, FailureReporting::Unified) => Some(SIGN_OUT_FAILED_MESSAGE),
        (Transition::Register | Transition::SignOut, FailureReporting::Asymmetric) => None,
    }
}

/// Clears the in-flight marker when a transition settles or its future is dropped.
///
/// A transition dropped before it settled re-enables the controls, since no
/// failure report or navigation will do it.
struct InFlight<'a, U: UiPort> {
    marker: &'a Cell<Option<Transition>>,
    ui: &'a U,
    settled: bool,
}

impl<U: UiPort> InFlight<'_, U> {
    fn finish<T>(mut self, result: T) -> T {
        self.settled = true;
        result
    }
}

impl<U: UiPort> Drop for InFlight<'_, U> {
    fn drop(&mut self) {
        self.marker.set(None);
        if !self.settled {
            log::warn!("transition abandoned before it settled");
            self.ui.set_controls_disabled(false);
        }
    }
}
