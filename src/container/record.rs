//! Chunk record framing: `[len: u32 BE][nonce: 12 B][ciphertext ‖ tag]`.

use crate::config::{NONCE_SIZE, RECORD_LEN_SIZE};
use crate::error::SkitaError;

const RECORD_HEADER_LEN: usize = RECORD_LEN_SIZE + NONCE_SIZE;

/// Frames one sealed chunk as a contiguous record.
pub fn encode(nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(RECORD_HEADER_LEN + ciphertext.len());
    out.extend_from_slice(&(ciphertext.len() as u32).to_be_bytes());
    out.extend_from_slice(nonce);
    out.extend_from_slice(ciphertext);
    out
}

/// Reads one record from the front of `bytes`.
///
/// Returns the record's nonce, its ciphertext slice, and the number of
/// bytes consumed so the caller can advance to the next record.
pub fn decode(bytes: &[u8]) -> Result<([u8; NONCE_SIZE], &[u8], usize), SkitaError> {
    if bytes.len() < RECORD_HEADER_LEN {
        return Err(SkitaError::MalformedHeader("buffer shorter than one chunk record header"));
    }

    let len = u32::from_be_bytes(bytes[0..RECORD_LEN_SIZE].try_into().unwrap()) as usize;
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&bytes[RECORD_LEN_SIZE..RECORD_HEADER_LEN]);

    let end = RECORD_HEADER_LEN
        .checked_add(len)
        .ok_or(SkitaError::MalformedHeader("chunk record length overflows buffer"))?;
    if end > bytes.len() {
        return Err(SkitaError::MalformedHeader("chunk record extends past available bytes"));
    }

    Ok((nonce, &bytes[RECORD_HEADER_LEN..end], end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let nonce = [1u8; NONCE_SIZE];
        let record = encode(&nonce, b"ciphertexttag...");
        let (decoded_nonce, ciphertext, consumed) = decode(&record).unwrap();
        assert_eq!(decoded_nonce, nonce);
        assert_eq!(ciphertext, b"ciphertexttag...");
        assert_eq!(consumed, record.len());
    }

    #[test]
    fn rejects_truncated_record() {
        let nonce = [1u8; NONCE_SIZE];
        let mut record = encode(&nonce, b"some ciphertext");
        record.truncate(record.len() - 1);
        assert!(decode(&record).is_err());
    }
}
