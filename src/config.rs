//! Page configuration parsed from an embedded JSON block.
//!
//! The host page carries
//! `<script id="session-config" type="application/json">{...}</script>`
//! with the Firebase web-app settings and optional session settings:
//!
//! ```json
//! {
//!   "firebase": { "apiKey": "...", "authDomain": "...", "projectId": "..." },
//!   "session": { "homeRoute": "/", "failureReporting": "asymmetric" }
//! }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

/// Id of the `<script>` element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "session-config";
pub const DEFAULT_IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_HOME_ROUTE: &str = "/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config block is absent from the page.
    #[error("config element #{0} not found")]
    Missing(&'static str),
    /// The JSON could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// A required field is empty.
    #[error("config field {0} is required")]
    MissingField(&'static str),
}

/// Firebase web-app settings, as shown in the Firebase console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    /// Override for the Identity Toolkit base URL (e.g. the auth emulator).
    pub identity_toolkit_url: Option<String>,
}

impl FirebaseConfig {
    pub fn identity_toolkit_url(&self) -> &str {
        self.identity_toolkit_url
            .as_deref()
            .map_or(DEFAULT_IDENTITY_TOOLKIT_URL, |url| url.trim_end_matches('/'))
    }
}

/// Who gets told about a failed transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReporting {
    /// Sign-in failures show the generic alert; register and sign-out
    /// failures go to the log only.
    #[default]
    Asymmetric,
    /// Every failed transition shows an alert and is logged.
    Unified,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Redirect target after every successful transition.
    pub home_route: String,
    pub failure_reporting: FailureReporting,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { home_route: DEFAULT_HOME_ROUTE.to_owned(), failure_reporting: FailureReporting::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::MissingField`] when `firebase.apiKey` is empty.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.firebase.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("firebase.apiKey"));
        }
        if config.session.home_route.trim().is_empty() {
            config.session.home_route = DEFAULT_HOME_ROUTE.to_owned();
        }
        Ok(config)
    }

    /// Read the config block embedded in the current page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the element is absent (always the
    /// case outside the browser), otherwise the errors of [`Self::from_json`].
    pub fn from_page() -> Result<Self, ConfigError> {
        #[cfg(feature = "csr")]
        {
            let raw = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
                .and_then(|el| el.text_content())
                .ok_or(ConfigError::Missing(CONFIG_ELEMENT_ID))?;
            Self::from_json(&raw)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ConfigError::Missing(CONFIG_ELEMENT_ID))
        }
    }
}
