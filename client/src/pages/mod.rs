//! Route-level views.
//!
//! ARCHITECTURE
//! ============
//! Each view owns its form or panel state, talks to the backend through
//! `SessionService`, and returns navigation to the caller instead of
//! performing it. `panel` holds the shared text rendering.

pub mod home;
pub mod login;
pub mod panel;
