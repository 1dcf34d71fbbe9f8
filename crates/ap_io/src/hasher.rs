//! crates/ap_io/src/hasher.rs
//!
//! Deterministic hashing and ID builders for canonical artifacts.
//!
//! - Canonical JSON hashing: sorted object keys, array order preserved, no floats.
//! - `RES:<hex>` identifies an outcome document by its canonical bytes.
//! - Hex digests are lowercase.

#![forbid(unsafe_code)]

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::{to_canonical_bytes, to_canonical_value_bytes};
use crate::IoError;

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

/// SHA-256 over an already-parsed JSON value, canonicalized first.
pub fn sha256_canonical_value(v: &Value) -> Result<String, IoError> {
    Ok(sha256_hex(&to_canonical_value_bytes(v)?))
}

/// `RES:<hex>`: ID for an outcome document derived from **canonical** bytes.
pub fn res_id_from_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    let hex = sha256_canonical(value)?;
    Ok(format!("RES:{hex}"))
}

/// True for `RES:` followed by 64 lowercase hex digits.
pub fn is_res_id(s: &str) -> bool {
    s.strip_prefix("RES:")
        .is_some_and(|h| h.len() == 64 && h.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')))
}
