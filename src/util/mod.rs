//! Utility helpers shared across pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` turns API results into page outcomes; `cookies` parses the
//! `document.cookie` string format.

pub mod auth;
pub mod cookies;
