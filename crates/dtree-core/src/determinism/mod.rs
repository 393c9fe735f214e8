//! Deterministic encoding and hashing.
//!
//! Used to give every validated tree a stable content fingerprint, so hosts
//! can detect "same tree" without comparing documents field by field.

pub mod canonical;
pub mod hashing;

pub use canonical::{canonical_json_bytes, canonical_json_string};
pub use hashing::{hash_bytes_hex, hash_with_domain_hex, tree_fingerprint};
