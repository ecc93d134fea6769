//! crates/org_io/src/lib.rs
//! File-facing layer of the org-structure engine.
//!
//! - `store`: JSON store documents (v4) and migration of older shapes.
//! - `csv`: flat CSV export/import in the fixed column layout.
//! - `canonical_json`: sorted-key compact JSON and atomic file writes.
//! - `hasher`: SHA-256 digests of raw bytes and canonical snapshots.
//! - `ids`: fresh node identifiers.
//!
//! Everything returns `IoError`; nothing here touches process-global state.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for org_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse or shape errors, with a JSON Pointer to the offending value.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// CSV import errors; `line` is 1-based, 0 when not tied to a line.
    #[error("csv error at line {line}: {msg}")]
    Csv { line: usize, msg: String },

    /// A store document in none of the recognised shapes.
    #[error("migration error: {0}")]
    Migration(String),

    #[error("hash error: {0}")]
    Hash(String),

    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json reports line/column, not a pointer.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod csv;
#[cfg(feature = "hash")]
pub mod hasher;
pub mod ids;
pub mod store;

pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_json_bytes, write_canonical_file};
    pub use crate::csv::{import_csv_text, parse_csv, to_csv, CSV_HEADER};
    #[cfg(feature = "hash")]
    pub use crate::hasher::{sha256_canonical, sha256_hex, snapshot_sha256};
    pub use crate::ids::generate_node_id;
    pub use crate::store::{load_store, migrate_value, parse_store, save_store, StoreData, STORE_VERSION};
}
