//! Shared domain types for the fablehouse story pipeline.
//!
//! Everything here is plain data and pure functions. IO lives in the
//! `db`, `genai` and `storage` crates.

pub mod access;
pub mod character;
pub mod error;
pub mod pages;
pub mod prompt;
pub mod request;
pub mod story;
pub mod types;

pub use error::CoreError;
pub use types::{DbId, Timestamp};
