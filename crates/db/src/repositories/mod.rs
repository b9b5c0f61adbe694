//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod character_profile_repo;
pub mod credit_repo;
pub mod story_page_repo;
pub mod story_repo;

pub use account_repo::AccountRepo;
pub use character_profile_repo::CharacterProfileRepo;
pub use credit_repo::CreditRepo;
pub use story_page_repo::StoryPageRepo;
pub use story_repo::StoryRepo;
