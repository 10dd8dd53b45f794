//! Session-derived UI state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` holds the plain data model (token, UI state, transitions) and
//! `sync` renders it onto a `UiPort`. Visibility is always recomputed from the
//! cookie store, never cached here.

pub mod session;
pub mod sync;
