//! Container header: serialization and parsing.
//!
//! ## Binary layout (big-endian throughout)
//!
//! ```text
//! 0        4   Magic              "SKTA"
//! 4        2   Version            0x0001 (no hash) or 0x0002 (hash follows filename)
//! 6        1   Algorithm id
//! 7        1   KDF id
//! 8        4   KDF memory (KiB)
//! 12       4   KDF iterations
//! 16       1   KDF parallelism
//! 17       32  Salt
//! 49       4   Chunk size
//! 53       4   Original size
//! 57       4   Total chunks
//! 61       2   Filename length F
//! 63       F   Filename (UTF-8)
//! 63+F     32  Plaintext hash (only present when version is 0x0002)
//! ```

use crate::config::{HASH_SIZE, KDF_ARGON2ID, MAGIC, MAX_FILENAME_LEN, SALT_SIZE, VERSION_V1, VERSION_V2};
use crate::error::SkitaError;
use crate::types::{Algorithm, KdfParams};

const FIXED_PREFIX_LEN: usize = 63;

pub struct Header {
    pub version: u16,
    pub algorithm: Algorithm,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_SIZE],
    pub chunk_size: u32,
    pub original_size: u32,
    pub total_chunks: u32,
    pub filename: String,
    pub plaintext_hash: Option<[u8; HASH_SIZE]>,
}

impl Header {
    /// Serializes the header. Writes version `0x0002` whenever `plaintext_hash`
    /// is set, so readers can disambiguate by version rather than by header
    /// length (see DESIGN.md).
    pub fn serialize(&self) -> Result<Vec<u8>, SkitaError> {
        if self.filename.len() > MAX_FILENAME_LEN {
            return Err(SkitaError::InputTooLarge("filename exceeds 65535 bytes"));
        }

        let version = if self.plaintext_hash.is_some() { VERSION_V2 } else { VERSION_V1 };

        let mut out = Vec::with_capacity(FIXED_PREFIX_LEN + self.filename.len() + HASH_SIZE);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&version.to_be_bytes());
        out.push(self.algorithm.id());
        out.push(KDF_ARGON2ID);
        out.extend_from_slice(&self.kdf_params.memory_kib.to_be_bytes());
        out.extend_from_slice(&self.kdf_params.time_cost.to_be_bytes());
        out.push(self.kdf_params.parallelism);
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.chunk_size.to_be_bytes());
        out.extend_from_slice(&self.original_size.to_be_bytes());
        out.extend_from_slice(&self.total_chunks.to_be_bytes());
        out.extend_from_slice(&(self.filename.len() as u16).to_be_bytes());
        out.extend_from_slice(self.filename.as_bytes());
        if let Some(hash) = self.plaintext_hash {
            out.extend_from_slice(&hash);
        }

        Ok(out)
    }

    /// Parses a header from the front of `bytes`, returning the header and
    /// the number of bytes it consumed (the offset where chunk records
    /// begin).
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize), SkitaError> {
        if bytes.len() < FIXED_PREFIX_LEN {
            return Err(SkitaError::MalformedHeader("buffer shorter than fixed header prefix"));
        }

        if &bytes[0..4] != MAGIC {
            return Err(SkitaError::BadMagic);
        }

        let version = u16::from_be_bytes([bytes[4], bytes[5]]);
        if version != VERSION_V1 && version != VERSION_V2 {
            return Err(SkitaError::UnsupportedVersion(version));
        }

        let algorithm = Algorithm::from_id(bytes[6])?;

        let kdf_id = bytes[7];
        if kdf_id != KDF_ARGON2ID {
            return Err(SkitaError::UnsupportedKdf(kdf_id));
        }

        let kdf_params = KdfParams {
            memory_kib: u32::from_be_bytes(bytes[8..12].try_into().unwrap()),
            time_cost: u32::from_be_bytes(bytes[12..16].try_into().unwrap()),
            parallelism: bytes[16],
        };

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[17..17 + SALT_SIZE]);

        let chunk_size = u32::from_be_bytes(bytes[49..53].try_into().unwrap());
        let original_size = u32::from_be_bytes(bytes[53..57].try_into().unwrap());
        let total_chunks = u32::from_be_bytes(bytes[57..61].try_into().unwrap());
        let filename_len = u16::from_be_bytes([bytes[61], bytes[62]]) as usize;

        let filename_end = FIXED_PREFIX_LEN
            .checked_add(filename_len)
            .ok_or(SkitaError::MalformedHeader("filename length overflows header"))?;
        if filename_end > bytes.len() {
            return Err(SkitaError::MalformedHeader("filename length extends past available bytes"));
        }

        let filename = String::from_utf8(bytes[FIXED_PREFIX_LEN..filename_end].to_vec())
            .map_err(|_| SkitaError::MalformedHeader("filename is not valid UTF-8"))?;

        let (plaintext_hash, consumed) = if version == VERSION_V2 {
            let hash_end = filename_end
                .checked_add(HASH_SIZE)
                .ok_or(SkitaError::MalformedHeader("hash trailer overflows header"))?;
            if hash_end > bytes.len() {
                return Err(SkitaError::MalformedHeader("v2 header missing plaintext hash trailer"));
            }
            let mut hash = [0u8; HASH_SIZE];
            hash.copy_from_slice(&bytes[filename_end..hash_end]);
            (Some(hash), hash_end)
        } else {
            (None, filename_end)
        };

        Ok((
            Self { version, algorithm, kdf_params, salt, chunk_size, original_size, total_chunks, filename, plaintext_hash },
            consumed,
        ))
    }
}
