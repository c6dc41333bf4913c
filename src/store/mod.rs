//! Persistent digest store for tree comparisons.
//!
//! Two copies of a tree are compared by recording, per relative file path,
//! the MD5/SHA-1 digests observed in each copy. Rows whose digests differ are
//! then copied into a second table for review.
//!
//! # Architecture
//!
//! * [`database`]: SQLite handle, schema creation, inserts and the mismatch extraction query.
//! * [`record`]: The row type shared by both tables and its mismatch predicate.
//!
//! # Schema
//!
//! Both `file_hashes` and `mismatched_hashes` have the same five `TEXT`
//! columns and no constraints. Tables are created with `IF NOT EXISTS`, so an
//! existing store is reused as-is.

pub mod database;
pub mod record;

pub use database::{HashStore, StoreError, StoreResult};
pub use record::{FileRecord, MismatchRecord};
