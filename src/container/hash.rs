//! Whole-plaintext SHA-256 integrity hash.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::HASH_SIZE;
use crate::error::SkitaError;

/// Computes the SHA-256 hash of the full plaintext.
pub fn compute(plaintext: &[u8]) -> [u8; HASH_SIZE] {
    Sha256::digest(plaintext).into()
}

/// Verifies `actual` against `expected` in constant time.
pub fn verify(expected: &[u8; HASH_SIZE], actual: &[u8; HASH_SIZE]) -> Result<(), SkitaError> {
    if expected.ct_eq(actual).into() {
        Ok(())
    } else {
        Err(SkitaError::IntegrityFailure)
    }
}
