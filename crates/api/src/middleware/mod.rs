//! Authentication middleware extractors.
//!
//! - [`auth::AuthAccount`] -- Extracts the authenticated account from a
//!   JWT Bearer token.

pub mod auth;
