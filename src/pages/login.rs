//! Login / logout page with email + password auth.
//!
//! Renders the control surface the session controller drives: `email`,
//! `password`, `login`, `sign-up`, `logout-link`, `login-box`,
//! `authenticated-box`, and `alert`. Visibility and the disabled flag are
//! plain signals written through [`UiPort`].

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::session::{Credentials, Transition};
use crate::state::sync::UiPort;

/// Signals backing the login page controls.
#[derive(Clone, Copy, Debug)]
pub struct LoginSignals {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub login_visible: RwSignal<bool>,
    pub authenticated_visible: RwSignal<bool>,
    pub busy: RwSignal<bool>,
    pub alert: RwSignal<Option<String>>,
}

impl LoginSignals {
    /// Both boxes start hidden until the first sync.
    pub fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            login_visible: RwSignal::new(false),
            authenticated_visible: RwSignal::new(false),
            busy: RwSignal::new(false),
            alert: RwSignal::new(None),
        }
    }
}

impl Default for LoginSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl UiPort for LoginSignals {
    fn credentials(&self) -> Credentials {
        Credentials { email: self.email.get_untracked(), password: self.password.get_untracked() }
    }

    fn set_login_visible(&self, visible: bool) {
        self.login_visible.set(visible);
    }

    fn set_authenticated_visible(&self, visible: bool) {
        self.authenticated_visible.set(visible);
    }

    fn set_controls_disabled(&self, disabled: bool) {
        self.busy.set(disabled);
    }

    fn show_alert(&self, message: &str) {
        self.alert.set(Some(message.to_owned()));
    }

    fn hide_alert(&self) {
        self.alert.set(None);
    }
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Login form, authenticated box, and alert.
///
/// `on_trigger` is called with the transition a button requests; it must
/// not block.
#[component]
pub fn LoginPage<F>(ui: LoginSignals, on_trigger: F) -> impl IntoView
where
    F: Fn(Transition) + Clone + Send + Sync + 'static,
{
    let on_login = on_trigger.clone();
    let on_sign_up = on_trigger.clone();
    let on_logout = on_trigger;

    view! {
        <div class="login-page">
            <div id="login-box" class="login-card" style:display=move || display(ui.login_visible.get())>
                <h1>"Sign in"</h1>
                <input
                    id="email"
                    class="login-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || ui.email.get()
                    on:input=move |ev| ui.email.set(event_target_value(&ev))
                />
                <input
                    id="password"
                    class="login-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || ui.password.get()
                    on:input=move |ev| ui.password.set(event_target_value(&ev))
                />
                <button
                    id="login"
                    class="login-button"
                    type="button"
                    disabled=move || ui.busy.get()
                    on:click=move |_| on_login(Transition::SignIn)
                >
                    "Log in"
                </button>
                <button
                    id="sign-up"
                    class="login-button"
                    type="button"
                    disabled=move || ui.busy.get()
                    on:click=move |_| on_sign_up(Transition::Register)
                >
                    "Sign up"
                </button>
            </div>
            <div
                id="authenticated-box"
                class="login-card"
                style:display=move || display(ui.authenticated_visible.get())
            >
                <p class="login-card__subtitle">"You are signed in."</p>
                <button
                    id="logout-link"
                    class="login-button"
                    type="button"
                    disabled=move || ui.busy.get()
                    on:click=move |_| on_logout(Transition::SignOut)
                >
                    "Log out"
                </button>
            </div>
            <div id="alert" class="login-message" style:display=move || display(ui.alert.get().is_some())>
                {move || ui.alert.get().unwrap_or_default()}
            </div>
        </div>
    }
}
