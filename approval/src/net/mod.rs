//! Networking for the approval endpoint.

pub mod api;
pub mod types;
