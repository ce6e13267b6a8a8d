//! Networking for the session lab backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the token-attaching HTTP transport, `error` classifies its
//! failures, `session` exposes one typed call per endpoint, and `types`
//! defines the wire schema.

pub mod api;
pub mod error;
pub mod session;
pub mod types;
