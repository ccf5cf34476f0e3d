//! Page-level client state.
//!
//! DESIGN
//! ======
//! Each page owns one state model; the two pages share nothing in memory.
//! The browser cookie jar is the only state that outlives a page.

pub mod auth;
pub mod login;
