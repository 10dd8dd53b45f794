//! Utility helpers isolating browser concerns from session logic.
//!
//! SYSTEM CONTEXT
//! ==============
//! `cookie` owns every read and write of the `token` cookie; `navigate` owns
//! page navigation. Both expose a trait seam so the controller can be driven
//! without a browser.

pub mod cookie;
pub mod navigate;
