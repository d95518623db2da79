//! Key derivation and AEAD sealing for the `.skita` engine.

pub mod aead;
pub mod derive;

pub use aead::{AeadCipher, cipher_for};
pub use derive::{derive_chunk_key, derive_chunk_nonce, derive_master, generate_master_nonce, generate_salt};
