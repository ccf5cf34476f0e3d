//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped state and delegates protocol work to
//! `util::auth`, which returns what the page should do next.

pub mod dashboard;
pub mod login;
