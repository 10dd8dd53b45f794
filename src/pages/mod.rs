//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages own the markup and signals; session orchestration stays in
//! `controller` and reaches the page only through `UiPort`.

pub mod login;
