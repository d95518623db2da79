//! Master key derivation (Argon2id) and the per-chunk key/nonce schedule.

use argon2::{Argon2, Params, Version};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::config::{KEY_SIZE, NONCE_SIZE, SALT_SIZE};
use crate::error::SkitaError;
use crate::types::KdfParams;

/// Derives the 32-byte master secret from a password, salt and cost parameters.
pub fn derive_master(password: &[u8], salt: &[u8; SALT_SIZE], params: KdfParams) -> Result<[u8; KEY_SIZE], SkitaError> {
    let argon_params = Params::new(params.memory_kib, params.time_cost, u32::from(params.parallelism), Some(KEY_SIZE))
        .map_err(|e| SkitaError::KdfFailure(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon_params);

    let started = std::time::Instant::now();
    let mut master = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password, salt, &mut master)
        .map_err(|e| SkitaError::KdfFailure(e.to_string()))?;
    tracing::debug!(
        target: "crypto",
        memory_kib = params.memory_kib,
        iterations = params.time_cost,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "argon2id master secret derived"
    );

    Ok(master)
}

/// Derives the per-chunk key `CK_i = SHA-256(MS || "chunk-" || decimal(i))`.
pub fn derive_chunk_key(master: &[u8; KEY_SIZE], index: u64) -> [u8; KEY_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(master);
    hasher.update(b"chunk-");
    hasher.update(index.to_string().as_bytes());
    hasher.finalize().into()
}

/// Derives the per-chunk nonce `CN_i = MN[0..8] || be32(i)`.
pub fn derive_chunk_nonce(master_nonce: &[u8; NONCE_SIZE], index: u32) -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    nonce[..8].copy_from_slice(&master_nonce[..8]);
    nonce[8..].copy_from_slice(&index.to_be_bytes());
    nonce
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::rng().fill(&mut bytes);
    bytes
}

/// Generates a random Argon2id salt.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    random_bytes()
}

/// Generates a random master nonce `MN`, stored in the header and used to
/// seed every `CN_i`.
pub fn generate_master_nonce() -> [u8; NONCE_SIZE] {
    random_bytes()
}
