//! # approval
//!
//! Headless client for the approval lab: one form, one POST, one result view.
//! The result is keyed off the response `status`; the client makes no
//! approval decisions of its own.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;

#[cfg(test)]
pub(crate) mod test_helpers;
