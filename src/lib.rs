//! `skita` — password-based file encryption with chunked AEAD.
//!
//! Converts arbitrary bytes into a self-describing `.skita` container and
//! back: Argon2id key derivation, a deterministic per-chunk key/nonce
//! schedule, AES-256-GCM or ChaCha20-Poly1305 chunk encryption, and a
//! whole-plaintext SHA-256 integrity hash.

pub mod config;
pub mod container;
pub mod crypto;
pub mod error;
pub mod pipeline;
pub mod secret;
pub mod types;
