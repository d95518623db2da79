//! Container format constants and cryptographic defaults.
//!
//! This module is the single source of truth for the `.skita` container
//! layout: magic bytes, version/algorithm/KDF identifiers, field sizes, and
//! the Argon2id defaults applied when a caller doesn't override them.

/// File extension appended to encrypted containers.
pub const FILE_EXTENSION: &str = ".skita";

/// Magic bytes identifying a `.skita` container.
pub const MAGIC: &[u8; 4] = b"SKTA";

/// Container version written when no plaintext hash is embedded.
///
/// Readers must still accept this value even when a hash trailer is
/// present, for interoperability with older writers (see DESIGN.md).
pub const VERSION_V1: u16 = 0x0001;

/// Container version written when a plaintext hash trailer is embedded.
pub const VERSION_V2: u16 = 0x0002;

/// Algorithm identifier for AES-256-GCM.
pub const ALGORITHM_AES_256_GCM: u8 = 0x00;

/// Algorithm identifier for ChaCha20-Poly1305 (12-byte nonce, not XChaCha20).
pub const ALGORITHM_CHACHA20_POLY1305: u8 = 0x01;

/// Key Derivation Function identifier for Argon2id.
pub const KDF_ARGON2ID: u8 = 0x00;

/// Size of the derived master key and every AEAD key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an AEAD nonce in bytes (both AES-GCM and ChaCha20-Poly1305 here).
pub const NONCE_SIZE: usize = 12;

/// Size of the Argon2id salt in bytes.
pub const SALT_SIZE: usize = 32;

/// Size of an AEAD authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Size of the whole-plaintext SHA-256 hash trailer in bytes.
pub const HASH_SIZE: usize = 32;

/// Size of a chunk record's length-prefix field in bytes.
pub const RECORD_LEN_SIZE: usize = 4;

/// Plaintext chunk size used when encrypting: 4 MiB.
///
/// Large enough to amortize per-chunk AEAD and framing overhead, small
/// enough that a single chunk's ciphertext buffer stays a modest,
/// predictable allocation.
pub const CHUNK_SIZE: u64 = 4 * 1024 * 1024;

/// Argon2id time cost (number of passes) used by default.
pub const ARGON_TIME: u32 = 3;

/// Argon2id memory cost in KiB used by default: 64 MiB.
pub const ARGON_MEMORY: u32 = 64 * 1024;

/// Argon2id parallelism factor used by default.
///
/// `u8` because the header's parallelism field (offset 16) is one byte
/// (spec §4.1, §4.3.1) — the type matches the wire field so an
/// out-of-range value can't be constructed and silently truncated.
pub const ARGON_PARALLELISM: u8 = 4;

/// Maximum length of an embedded filename, in bytes.
///
/// Bounded by the header's 16-bit length field, not any filesystem limit.
pub const MAX_FILENAME_LEN: usize = u16::MAX as usize;

/// Largest original plaintext size this container format can describe.
///
/// The header's original-size field is 32 bits wide; files at or above
/// this size are out of scope (spec Non-goals).
pub const MAX_ORIGINAL_SIZE: u64 = u32::MAX as u64;

/// Minimum required password length for the CLI prompt.
pub const PASSWORD_MIN_LENGTH: usize = 8;
