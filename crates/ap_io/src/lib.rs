//! crates/ap_io/src/lib.rs
//! Scenario store boundary for the apportionment engine.
//!
//! - `scenario`: load + schema-validate scenario files, build `Roster` + `ElectionConfig`.
//! - `canonical_json`: sorted-key compact JSON and atomic writes.
//! - `hasher`: SHA-256 digests and `RES:` ids over canonical bytes.
//!
//! Local files only; no network I/O.

#![forbid(unsafe_code)]

use ap_core::CoreError;
use thiserror::Error;

/// Unified error for ap_io (scenario loading, canonical JSON, hashing).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON syntax or typed-deserialization errors.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// First JSON Schema violation, with its instance path.
    #[error("schema error at {pointer}: {msg}")]
    Schema { pointer: String, msg: String },

    /// Generic validation / invariants.
    #[error("invalid: {0}")]
    Invalid(String),

    /// Roster or configuration rejected by the core model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod canonical_json;
pub mod hasher;
pub mod scenario;

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{res_id_from_canonical, sha256_canonical, sha256_hex};
    pub use crate::scenario::{load_scenario_file, parse_scenario_str, Scenario, ScenarioFile, ScenarioKind};
}
