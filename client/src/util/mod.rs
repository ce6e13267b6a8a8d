//! Utility helpers shared across views.

pub mod auth;
