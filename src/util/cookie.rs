//! Session token persistence in the browser cookie jar.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionCookieStore` is the only writer of the `token` cookie and the only
//! parser of `document.cookie`. UI state is derived from what it returns, so
//! every read goes through [`parse_cookie_value`].
//!
//! The cookie is built with the `cookie` crate as
//! `token=<value>; SameSite=Strict; Path=/` with no expiry. Clearing writes an
//! empty value with the same attributes, since a browser only replaces a
//! cookie whose scope attributes match.
//!
//! Every write is read back. A browser with cookies blocked accepts
//! `document.cookie = ...` without complaint and stores nothing, so the
//! read-back is the only way to notice.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

use std::cell::RefCell;

use cookie::{Cookie, SameSite};

use crate::state::session::SessionToken;

/// Cookie key holding the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Errors raised when writing the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    /// The token contains a byte that would split or corrupt the cookie pair.
    #[error("token contains a character that cannot be stored in a cookie")]
    InvalidToken,
    /// An empty token would read back as signed out.
    #[error("refusing to store an absent token")]
    AbsentToken,
    /// The jar could not take the record at all.
    #[error("cookie jar rejected the write: {0}")]
    Rejected(String),
    /// The write went through but reading it back gave a different value.
    #[error("session cookie was not persisted")]
    NotPersisted,
}

/// Raw access to a cookie jar, shaped like `document.cookie`.
///
/// `read_all` returns every visible cookie as `k1=v1; k2=v2`. `write` takes a
/// single `k=v; attr...` record and replaces any cookie with the same key.
pub trait CookieJar {
    fn read_all(&self) -> String;

    /// # Errors
    ///
    /// Returns [`CookieError::Rejected`] when the jar cannot accept the record.
    fn write(&self, record: &str) -> Result<(), CookieError>;
}

/// Typed access to the `token` cookie.
pub struct SessionCookieStore<J> {
    jar: J,
}

impl<J: CookieJar> SessionCookieStore<J> {
    pub fn new(jar: J) -> Self {
        Self { jar }
    }

    /// Persist `token` as a session-lifetime cookie scoped to `/`.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::AbsentToken`] for an empty token (use
    /// [`Self::clear_token`]) and [`CookieError::InvalidToken`] if the token
    /// contains `;`, CR or LF; the jar is left untouched in both cases.
    /// Returns [`CookieError::Rejected`] or [`CookieError::NotPersisted`] when
    /// the jar did not end up holding `token`.
    pub fn set_token(&self, token: &SessionToken) -> Result<(), CookieError> {
        if !token.is_present() {
            return Err(CookieError::AbsentToken);
        }
        if token.as_str().contains([';', '\r', '\n']) {
            return Err(CookieError::InvalidToken);
        }
        self.jar.write(&token_record(token.as_str()))?;
        if self.get_token() != *token {
            log::error!("session cookie did not read back after write");
            return Err(CookieError::NotPersisted);
        }
        Ok(())
    }

    /// Logically delete the token by overwriting it with an empty value.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::Rejected`] or [`CookieError::NotPersisted`] when
    /// a token is still readable afterwards.
    pub fn clear_token(&self) -> Result<(), CookieError> {
        self.jar.write(&token_record(""))?;
        if self.get_token().is_present() {
            log::error!("session cookie still present after clear");
            return Err(CookieError::NotPersisted);
        }
        Ok(())
    }

    /// Current token, or the absent token when the cookie is missing or empty.
    pub fn get_token(&self) -> SessionToken {
        SessionToken::new(parse_cookie_value(&self.jar.read_all(), TOKEN_COOKIE))
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }
}

fn token_record(value: &str) -> String {
    Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .same_site(SameSite::Strict)
        .build()
        .to_string()
}

/// Return the value stored under `key` in a `document.cookie` string.
///
/// Pairs are split on `;` and trimmed; each pair is split on its first `=`
/// only, so values may themselves contain `=`. Keys must match exactly and
/// malformed pairs are skipped. Returns an empty string when the key is absent.
pub fn parse_cookie_value(cookies: &str, key: &str) -> String {
    Cookie::split_parse(cookies)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == key)
        .map(|cookie| cookie.value().to_owned())
        .unwrap_or_default()
}

// =============================================================================
// JAR IMPLEMENTATIONS
// =============================================================================

/// In-process cookie jar with browser replace-by-key semantics.
///
/// Attributes of a written record are dropped, matching what
/// `document.cookie` reads back.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<(String, String)>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a jar pre-populated from a `k1=v1; k2=v2` string. Malformed
    /// pairs are skipped.
    pub fn from_cookie_string(cookies: &str) -> Self {
        let jar = Self::new();
        for cookie in Cookie::split_parse(cookies).filter_map(Result::ok) {
            jar.insert(cookie.name(), cookie.value());
        }
        jar
    }

    /// Number of distinct cookies in the jar.
    pub fn len(&self) -> usize {
        self.cookies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.borrow().is_empty()
    }

    fn insert(&self, name: &str, value: &str) {
        let mut cookies = self.cookies.borrow_mut();
        if let Some(existing) = cookies.iter_mut().find(|(n, _)| n == name) {
            value.clone_into(&mut existing.1);
        } else {
            cookies.push((name.to_owned(), value.to_owned()));
        }
    }
}

impl CookieJar for MemoryCookieJar {
    fn read_all(&self) -> String {
        self.cookies
            .borrow()
            .iter()
            .map(|(name, value)| Cookie::new(name.as_str(), value.as_str()).to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, record: &str) -> Result<(), CookieError> {
        let cookie = Cookie::parse(record).map_err(|e| CookieError::Rejected(e.to_string()))?;
        self.insert(cookie.name(), cookie.value());
        Ok(())
    }
}

/// `document.cookie` of the current page.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCookieJar;

#[cfg(feature = "csr")]
impl CookieJar for BrowserCookieJar {
    fn read_all(&self) -> String {
        html_document()
            .and_then(|doc| doc.cookie().ok())
            .unwrap_or_default()
    }

    fn write(&self, record: &str) -> Result<(), CookieError> {
        let doc = html_document().ok_or_else(|| CookieError::Rejected("no document".to_owned()))?;
        doc.set_cookie(record)
            .map_err(|e| CookieError::Rejected(format!("{e:?}")))
    }
}

#[cfg(feature = "csr")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}
