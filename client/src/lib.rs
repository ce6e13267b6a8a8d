//! # client
//!
//! Headless client for the session lab backend.
//!
//! The crate keeps the pieces of a login/profile frontend that carry logic:
//! the token cookie, the HTTP layer with its error classification, typed
//! session calls, route guards, and the login/home view state machines.
//! Views never navigate on their own; they hand a [`app::Route`] back to the
//! caller, which owns the actual navigation.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;
