//! Identity-provider access.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provider` defines the SDK boundary, `firebase` implements it against the
//! Identity Toolkit REST API, `gateway` normalizes every call into an
//! `AuthOutcome`, and `types` holds the outcome and error taxonomy.

pub mod firebase;
pub mod gateway;
pub mod provider;
pub mod types;
