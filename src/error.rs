//! Stable error taxonomy for the encryption engine.
//!
//! Every failure mode the container codec and pipeline can produce maps to
//! exactly one variant here, so callers can match on a kind rather than
//! parse a message. The CLI layer still works in `anyhow::Result` for
//! presentation, converting into it via the blanket `std::error::Error`
//! impl `thiserror` derives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkitaError {
    #[error("not a skita container: bad magic bytes")]
    BadMagic,

    #[error("unsupported container version: {0:#06x}")]
    UnsupportedVersion(u16),

    #[error("unsupported algorithm identifier: {0:#04x}")]
    UnsupportedAlgorithm(u8),

    #[error("unsupported KDF identifier: {0:#04x}")]
    UnsupportedKdf(u8),

    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    #[error("key derivation failed: {0}")]
    KdfFailure(String),

    #[error("authentication failed while opening a chunk")]
    AuthFailure,

    #[error("plaintext integrity hash did not match")]
    IntegrityFailure,

    #[error("input too large: {0}")]
    InputTooLarge(&'static str),

    #[error("operation was cancelled")]
    Cancelled,
}
