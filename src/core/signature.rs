//! Signature primitives for gateway requests and callbacks.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex SHA-256 of the given input
pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Lowercase hex HMAC-SHA256 of `message` keyed with `key`
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Compares a calculated signature with a received one in constant time.
///
/// Only the length comparison short-circuits; equal-length inputs are always
/// compared in full.
pub fn signatures_match(calculated: &str, received: &str) -> bool {
    let a = calculated.as_bytes();
    let b = received.as_bytes();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}
