//! Deterministic hashing utilities.
//!
//! All hashes are SHA-256, lowercase hex, and domain-separated: the domain
//! label is prepended to the payload so a tree fingerprint can never collide
//! with a hash of some other artifact that happens to share bytes.

use sha2::{Digest, Sha256};

use crate::determinism::canonical::canonical_json_bytes;
use crate::errors::DtreeResult;
use crate::model::ValidatedTree;

/// Hash raw bytes and return lowercase hex string.
pub fn hash_bytes_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Domain-separated hash.
pub fn hash_with_domain_hex(domain: &str, payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(domain.len() + payload.len());
    buf.extend_from_slice(domain.as_bytes());
    buf.extend_from_slice(payload);
    hash_bytes_hex(&buf)
}

/// Content fingerprint of a validated tree.
///
/// Equal trees give equal fingerprints regardless of key order inside
/// `data` payloads.
pub fn tree_fingerprint(tree: &ValidatedTree) -> DtreeResult<String> {
    let bytes = canonical_json_bytes(&tree.to_raw())?;
    Ok(hash_with_domain_hex(crate::domain::TREE, &bytes))
}
