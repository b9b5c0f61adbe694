//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is mutable

pub mod account;
pub mod character_profile;
pub mod credit;
pub mod story;
pub mod story_page;
