//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation for tokens minted by the
//!   external identity provider (plus a generator for tests and local
//!   development).

pub mod jwt;
