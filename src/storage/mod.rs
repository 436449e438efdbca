//! Persistence
//!
//! JSON-file storage for build records and per-project version history.

pub mod records;
pub mod versions;

pub use records::BuildRecord;
pub use versions::{Version, VersionStore};
