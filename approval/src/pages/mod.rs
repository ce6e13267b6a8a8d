//! Request form and result views.

pub mod request;
pub mod result;
