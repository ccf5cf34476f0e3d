//! Networking modules for the authentication API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the protocol (handshake, identity, logout), `transport` is
//! the seam to an HTTP stack, `browser` and `native` implement it, and
//! `types` defines the request/response and payload shapes.

pub mod api;
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
