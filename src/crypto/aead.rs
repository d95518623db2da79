//! AEAD sealing/opening with an externally supplied key and nonce.
//!
//! Unlike a self-contained AEAD wrapper that generates and prepends its own
//! nonce, these ciphers take `key`/`nonce` as parameters: the container
//! format derives both deterministically per chunk and frames the nonce
//! itself, so nothing here ever touches an RNG.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key as AesKey, KeyInit as AesKeyInit, Nonce as AesNonce};
use chacha20poly1305::{ChaCha20Poly1305, Key as ChaChaKey, KeyInit as ChaChaKeyInit, Nonce as ChaChaNonce};

use crate::config::{KEY_SIZE, NONCE_SIZE};
use crate::error::SkitaError;
use crate::types::Algorithm;

/// A single-use-per-call AEAD cipher: no associated data, explicit nonce.
pub trait AeadCipher {
    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, SkitaError>;
    fn open(&self, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>, SkitaError>;
}

pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self { cipher: Aes256Gcm::new(AesKey::<Aes256Gcm>::from_slice(key)) }
    }
}

impl AeadCipher for AesGcmCipher {
    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, SkitaError> {
        self.cipher.encrypt(AesNonce::from_slice(nonce), plaintext).map_err(|_| SkitaError::AuthFailure)
    }

    fn open(&self, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>, SkitaError> {
        self.cipher.decrypt(AesNonce::from_slice(nonce), ciphertext).map_err(|_| SkitaError::AuthFailure)
    }
}

pub struct ChaCha20Cipher {
    cipher: ChaCha20Poly1305,
}

impl ChaCha20Cipher {
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self { cipher: ChaCha20Poly1305::new(ChaChaKey::from_slice(key)) }
    }
}

impl AeadCipher for ChaCha20Cipher {
    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, SkitaError> {
        self.cipher.encrypt(ChaChaNonce::from_slice(nonce), plaintext).map_err(|_| SkitaError::AuthFailure)
    }

    fn open(&self, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Result<Vec<u8>, SkitaError> {
        self.cipher.decrypt(ChaChaNonce::from_slice(nonce), ciphertext).map_err(|_| SkitaError::AuthFailure)
    }
}

/// Constructs the cipher named by `algorithm`, keyed with `key`.
pub fn cipher_for(algorithm: Algorithm, key: &[u8; KEY_SIZE]) -> Box<dyn AeadCipher + Send + Sync> {
    match algorithm {
        Algorithm::Aes256Gcm => Box::new(AesGcmCipher::new(key)),
        Algorithm::ChaCha20Poly1305 => Box::new(ChaCha20Cipher::new(key)),
    }
}
