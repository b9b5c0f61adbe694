//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the pipeline or the
//! repositories in `fablehouse_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod characters;
pub mod stories;
