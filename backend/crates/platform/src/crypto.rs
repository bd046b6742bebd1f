//! Cryptographic Utilities

use std::sync::Mutex;

use base64::{Engine, engine::general_purpose};
use rand::{CryptoRng, RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Source of cryptographically secure random bytes
///
/// Passed explicitly to everything that needs randomness (salts, user IDs,
/// session tokens) so callers decide where entropy comes from.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Any seedable CSPRNG behind a mutex (deterministic sources in tests)
impl<R> RandomSource for Mutex<R>
where
    R: RngCore + CryptoRng + Send,
{
    fn fill_bytes(&self, dest: &mut [u8]) {
        // A panic while holding the lock leaves the generator state intact
        let mut rng = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.fill_bytes(dest);
    }
}

/// Generate `len` random bytes from `source`
pub fn random_bytes(source: &dyn RandomSource, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    source.fill_bytes(&mut bytes);
    bytes
}

/// Generate a fixed-size random array from `source`
pub fn random_array<const N: usize>(source: &dyn RandomSource) -> [u8; N] {
    let mut bytes = [0u8; N];
    source.fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Encode bytes as URL-safe base64 without padding (cookie-safe)
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
