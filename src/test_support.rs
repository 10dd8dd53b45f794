//! Test doubles for the provider, UI, and navigation seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::net::provider::{IdentityProvider, ProviderFailure, ProviderUser};
use crate::state::session::{Credentials, SessionToken};
use crate::state::sync::UiPort;
use crate::util::cookie::{CookieError, CookieJar, MemoryCookieJar};
use crate::util::navigate::{Navigation, Navigator};

// =========================================================================
// MockProvider
// =========================================================================

pub struct MockProvider {
    pub create_result: RefCell<Result<ProviderUser, ProviderFailure>>,
    pub sign_in_result: RefCell<Result<ProviderUser, ProviderFailure>>,
    pub sign_out_result: RefCell<Result<(), ProviderFailure>>,
    /// Calls in order, with the email for credential calls.
    pub calls: RefCell<Vec<String>>,
    /// When set, the next credential call waits for this before answering.
    pub gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockProvider {
    /// Provider that accepts everything and issues `token`.
    pub fn accepting(token: &str) -> Self {
        let user = ProviderUser { uid: "uid-1".into(), email: None, id_token: SessionToken::new(token) };
        Self {
            create_result: RefCell::new(Ok(user.clone())),
            sign_in_result: RefCell::new(Ok(user)),
            sign_out_result: RefCell::new(Ok(())),
            calls: RefCell::new(Vec::new()),
            gate: RefCell::new(None),
        }
    }

    pub fn failing_create(self, code: &str) -> Self {
        *self.create_result.borrow_mut() = Err(ProviderFailure::new(code, format!("{code} message")));
        self
    }

    pub fn failing_sign_in(self, code: &str) -> Self {
        *self.sign_in_result.borrow_mut() = Err(ProviderFailure::new(code, format!("{code} message")));
        self
    }

    pub fn failing_sign_out(self, code: &str) -> Self {
        *self.sign_out_result.borrow_mut() = Err(ProviderFailure::new(code, format!("{code} message")));
        self
    }

    pub fn gated(self, gate: oneshot::Receiver<()>) -> Self {
        *self.gate.borrow_mut() = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MockProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure> {
        self.calls.borrow_mut().push(format!("create_account {email} {password}"));
        self.wait_for_gate().await;
        self.create_result.borrow().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, ProviderFailure> {
        self.calls.borrow_mut().push(format!("sign_in {email} {password}"));
        self.wait_for_gate().await;
        self.sign_in_result.borrow().clone()
    }

    async fn id_token(&self, user: &ProviderUser) -> Result<SessionToken, ProviderFailure> {
        self.calls.borrow_mut().push("id_token".into());
        Ok(user.id_token.clone())
    }

    async fn sign_out(&self) -> Result<(), ProviderFailure> {
        self.calls.borrow_mut().push("sign_out".into());
        self.sign_out_result.borrow().clone()
    }
}

// =========================================================================
// RecordingUi
// =========================================================================

#[derive(Default)]
pub struct RecordingUi {
    pub credentials: RefCell<Credentials>,
    pub login_visible: Cell<Option<bool>>,
    pub authenticated_visible: Cell<Option<bool>>,
    pub controls_disabled: Cell<bool>,
    pub alert: RefCell<Option<String>>,
}

impl RecordingUi {
    pub fn with_credentials(email: &str, password: &str) -> Self {
        let ui = Self::default();
        *ui.credentials.borrow_mut() = Credentials { email: email.into(), password: password.into() };
        ui
    }

    pub fn alert(&self) -> Option<String> {
        self.alert.borrow().clone()
    }
}

impl UiPort for RecordingUi {
    fn credentials(&self) -> Credentials {
        self.credentials.borrow().clone()
    }

    fn set_login_visible(&self, visible: bool) {
        self.login_visible.set(Some(visible));
    }

    fn set_authenticated_visible(&self, visible: bool) {
        self.authenticated_visible.set(Some(visible));
    }

    fn set_controls_disabled(&self, disabled: bool) {
        self.controls_disabled.set(disabled);
    }

    fn show_alert(&self, message: &str) {
        *self.alert.borrow_mut() = Some(message.to_owned());
    }

    fn hide_alert(&self) {
        self.alert.borrow_mut().take();
    }
}

// =========================================================================
// Shared jar + RecordingNavigator
// =========================================================================

/// Jar handle shared between the store under test and an observer.
#[derive(Clone, Default)]
pub struct SharedJar(pub Rc<MemoryCookieJar>);

impl CookieJar for SharedJar {
    fn read_all(&self) -> String {
        self.0.read_all()
    }

    fn write(&self, record: &str) -> Result<(), CookieError> {
        self.0.write(record)
    }
}

/// Accepts every write and keeps nothing, like a browser with cookies blocked.
pub struct BlockedJar;

impl CookieJar for BlockedJar {
    fn read_all(&self) -> String {
        String::new()
    }

    fn write(&self, _record: &str) -> Result<(), CookieError> {
        Ok(())
    }
}

pub struct RecordingNavigator {
    pub mode: Navigation,
    pub visits: RefCell<Vec<String>>,
    /// Cookie string observed at each navigation.
    pub cookies_seen: RefCell<Vec<String>>,
    pub observed: Option<SharedJar>,
}

impl RecordingNavigator {
    pub fn new(mode: Navigation) -> Self {
        Self { mode, visits: RefCell::new(Vec::new()), cookies_seen: RefCell::new(Vec::new()), observed: None }
    }

    pub fn observing(mode: Navigation, jar: SharedJar) -> Self {
        Self { observed: Some(jar), ..Self::new(mode) }
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) -> Navigation {
        self.visits.borrow_mut().push(path.to_owned());
        if let Some(jar) = &self.observed {
            self.cookies_seen.borrow_mut().push(jar.read_all());
        }
        self.mode
    }
}
