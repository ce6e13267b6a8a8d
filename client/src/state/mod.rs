//! Client-side state shared between the HTTP layer and views.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the session token, `jar` persists cookies, and `ui` carries
//! the notices views raise for the caller to display.

pub mod auth;
pub mod jar;
pub mod ui;
