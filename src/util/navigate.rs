//! Post-transition navigation.
//!
//! A full navigation reloads the page, which re-runs the load-time UI sync.
//! An in-page navigation does not, so the caller must sync itself; the
//! returned [`Navigation`] tells it which happened.

/// How a navigation was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The document is being replaced; the next load re-syncs the UI.
    FullReload,
    /// The document stays; the caller is responsible for re-syncing.
    InPage,
}

pub trait Navigator {
    fn navigate(&self, path: &str) -> Navigation;
}

/// `window.location` of the current page.
#[cfg(feature = "csr")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "csr")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) -> Navigation {
        let Some(window) = web_sys::window() else {
            log::warn!("navigation to {path} skipped: no window");
            return Navigation::InPage;
        };
        match window.location().set_href(path) {
            Ok(()) => Navigation::FullReload,
            Err(e) => {
                log::error!("navigation to {path} failed: {e:?}");
                Navigation::InPage
            }
        }
    }
}
