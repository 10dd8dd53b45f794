//! Root application component.
//!
//! Builds the session controller from the page config, runs the load-time
//! sync, and hands the login page a trigger callback. Outside the browser
//! build the callback only logs.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::pages::login::{LoginPage, LoginSignals};
use crate::state::session::Transition;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let ui = LoginSignals::new();

    #[cfg(feature = "csr")]
    let on_trigger = {
        let controller = StoredValue::new_local(browser::build_controller(ui));
        move |transition: Transition| browser::dispatch(controller, transition)
    };
    #[cfg(not(feature = "csr"))]
    let on_trigger = |transition: Transition| log::debug!("{transition} ignored outside the browser");

    view! {
        <Title text="Sign in"/>
        <LoginPage ui on_trigger/>
    }
}

#[cfg(feature = "csr")]
mod browser {
    use std::rc::Rc;

    use leptos::prelude::*;

    use crate::config::AppConfig;
    use crate::controller::SessionController;
    use crate::net::firebase::FirebaseAuthClient;
    use crate::net::gateway::CredentialGateway;
    use crate::pages::login::LoginSignals;
    use crate::state::session::Transition;
    use crate::state::sync::UiPort;
    use crate::util::cookie::{BrowserCookieJar, SessionCookieStore};
    use crate::util::navigate::BrowserNavigator;

    const CONFIG_MISSING_MESSAGE: &str = "Sign-in is unavailable right now.";

    type BrowserController = SessionController<FirebaseAuthClient, BrowserCookieJar, LoginSignals, BrowserNavigator>;

    /// Build the controller and sync the page once. Without a usable config
    /// the login form stays visible but disabled.
    pub fn build_controller(ui: LoginSignals) -> Option<Rc<BrowserController>> {
        match AppConfig::from_page() {
            Ok(config) => {
                let controller = SessionController::new(
                    CredentialGateway::new(FirebaseAuthClient::new(config.firebase)),
                    SessionCookieStore::new(BrowserCookieJar),
                    ui,
                    BrowserNavigator,
                    config.session,
                );
                let state = controller.load();
                log::info!("session controller ready, session is {state:?}");
                Some(Rc::new(controller))
            }
            Err(e) => {
                log::error!("session controller disabled: {e}");
                ui.set_login_visible(true);
                ui.set_controls_disabled(true);
                ui.show_alert(CONFIG_MISSING_MESSAGE);
                None
            }
        }
    }

    pub fn dispatch(controller: StoredValue<Option<Rc<BrowserController>>, LocalStorage>, transition: Transition) {
        let Some(controller) = controller.get_value() else {
            log::warn!("{transition} ignored: no session controller");
            return;
        };
        leptos::task::spawn_local(async move {
            match controller.trigger(transition).await {
                Ok(state) => log::debug!("{transition} settled, session is {state:?}"),
                Err(e) => log::debug!("{transition} settled with error: {e}"),
            }
        });
    }
}
