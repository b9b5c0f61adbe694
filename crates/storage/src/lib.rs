//! Object storage for generated story assets.
//!
//! [`ObjectStore`] is the seam the pipeline writes through; the S3
//! implementation backs production and [`MemoryStore`] backs tests.
//! [`AssetPersister`] layers the download-then-upload flow on top and
//! owns the key layout under `stories/{id}/`.

pub mod error;
pub mod memory;
pub mod object_store;
pub mod persister;
pub mod s3;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use object_store::ObjectStore;
pub use persister::AssetPersister;
pub use s3::{S3Config, S3Store};
