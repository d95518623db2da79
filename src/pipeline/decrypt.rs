//! Decrypt: `.skita` container + password -> plaintext + original filename.

use rayon::prelude::*;

use crate::config::KEY_SIZE;
use crate::container::{Header, hash, record};
use crate::crypto::{cipher_for, derive_chunk_key, derive_master};
use crate::error::SkitaError;
use crate::pipeline::state::Pipeline;
use crate::secret::Password;
use crate::types::{Algorithm, CancellationToken, PipelineStatus, ProgressSink};

pub struct DecryptOptions {
    pub parallel: bool,
}

impl Default for DecryptOptions {
    fn default() -> Self {
        Self { parallel: false }
    }
}

pub struct DecryptOutput {
    pub plaintext: Vec<u8>,
    pub original_filename: String,
    pub verified: bool,
    pub plaintext_hash_hex: Option<String>,
}

/// Runs one decrypt call end-to-end, following spec.md §4.4.2 step-by-step.
pub fn run(
    container: &[u8],
    password: &Password,
    options: &DecryptOptions,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
    pipeline: &Pipeline,
) -> Result<DecryptOutput, SkitaError> {
    pipeline.set(PipelineStatus::Processing);
    tracing::debug!(target: "pipeline", container_bytes = container.len(), "starting decrypt");

    progress.on_progress(0, "parsing header");
    let (header, header_len) = match Header::parse(container) {
        Ok(parsed) => parsed,
        Err(err) => {
            pipeline.set(PipelineStatus::Error);
            return Err(err);
        }
    };
    progress.on_progress(5, "parsing header");

    progress.on_progress(8, "deriving key");
    let master = match derive_master(password.as_bytes(), &header.salt, header.kdf_params) {
        Ok(master) => master,
        Err(err) => {
            pipeline.set(PipelineStatus::Error);
            return Err(err);
        }
    };
    progress.on_progress(15, "deriving key");

    let body = &container[header_len..];

    let plaintext = if options.parallel {
        match decrypt_records_parallel(body, &master, header.algorithm, header.total_chunks) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                pipeline.set(PipelineStatus::Error);
                return Err(err);
            }
        }
    } else {
        match decrypt_records_sequential(body, &master, header.algorithm, header.total_chunks, cancel, progress) {
            Ok(plaintext) => plaintext,
            Err(SkitaError::Cancelled) => {
                pipeline.set(PipelineStatus::Cancelled);
                return Err(SkitaError::Cancelled);
            }
            Err(err) => {
                pipeline.set(PipelineStatus::Error);
                return Err(err);
            }
        }
    };

    let (verified, plaintext_hash_hex) = match header.plaintext_hash {
        Some(expected) => {
            progress.on_progress(98, "verifying integrity");
            let actual = hash::compute(&plaintext);
            if let Err(err) = hash::verify(&expected, &actual) {
                pipeline.set(PipelineStatus::Error);
                return Err(err);
            }
            (true, Some(hex::encode(actual)))
        }
        None => (false, None),
    };

    progress.on_progress(100, "done");
    tracing::info!(target: "pipeline", chunks = header.total_chunks, verified, "decrypt complete");
    pipeline.set(PipelineStatus::Success);

    Ok(DecryptOutput { plaintext, original_filename: header.filename, verified, plaintext_hash_hex })
}

fn decrypt_records_sequential(
    mut body: &[u8],
    master: &[u8; KEY_SIZE],
    algorithm: Algorithm,
    total_chunks: u32,
    cancel: &CancellationToken,
    progress: &dyn ProgressSink,
) -> Result<Vec<u8>, SkitaError> {
    let mut plaintext = Vec::new();

    for i in 0..total_chunks {
        if cancel.is_cancelled() {
            return Err(SkitaError::Cancelled);
        }

        let (nonce, ciphertext, consumed) = record::decode(body)?;
        let key = derive_chunk_key(master, u64::from(i));
        let cipher = cipher_for(algorithm, &key);
        let chunk = cipher.open(&nonce, ciphertext)?;
        tracing::trace!(target: "pipeline", chunk = i, cleartext_len = chunk.len(), "chunk opened");
        plaintext.extend_from_slice(&chunk);
        body = &body[consumed..];

        let percent = 15 + (u64::from(i + 1) * 80 / u64::from(total_chunks.max(1))) as u8;
        progress.on_progress(percent.min(95), "decrypting");
    }

    Ok(plaintext)
}

/// Parses every record sequentially (framing is inherently sequential —
/// each record's offset depends on the previous one's length) but opens
/// them in parallel, then reassembles plaintext in ascending index order.
fn decrypt_records_parallel(mut body: &[u8], master: &[u8; KEY_SIZE], algorithm: Algorithm, total_chunks: u32) -> Result<Vec<u8>, SkitaError> {
    let mut ciphertexts = Vec::with_capacity(total_chunks as usize);
    for _ in 0..total_chunks {
        let (nonce, ciphertext, consumed) = record::decode(body)?;
        ciphertexts.push((nonce, ciphertext.to_vec()));
        body = &body[consumed..];
    }

    let chunks: Vec<Vec<u8>> = ciphertexts
        .into_par_iter()
        .enumerate()
        .map(|(i, (nonce, ciphertext))| -> Result<Vec<u8>, SkitaError> {
            let key = derive_chunk_key(master, i as u64);
            let cipher = cipher_for(algorithm, &key);
            cipher.open(&nonce, &ciphertext)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(chunks.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encrypt::{self, EncryptOptions};
    use crate::types::NullProgress;

    fn roundtrip(plaintext: &[u8], filename: &str, password: &str) -> DecryptOutput {
        let pw = Password::new(password.to_string());
        let enc = encrypt::run(plaintext, filename, &pw, &EncryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap();
        run(&enc.container, &pw, &DecryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap()
    }

    #[test]
    fn roundtrip_recovers_plaintext_and_verifies() {
        let out = roundtrip(b"hello", "hello.txt", "pw");
        assert_eq!(out.plaintext, b"hello");
        assert!(out.verified);
        assert_eq!(out.original_filename, "hello.txt");
    }

    #[test]
    fn wrong_password_fails_on_first_chunk() {
        let pw = Password::new("alpha".to_string());
        let enc = encrypt::run(b"secret", "f", &pw, &EncryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap();
        let wrong = Password::new("beta".to_string());
        let err = run(&enc.container, &wrong, &DecryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap_err();
        assert!(matches!(err, SkitaError::AuthFailure));
    }

    #[test]
    fn corrupted_magic_is_rejected() {
        let pw = Password::new("pw".to_string());
        let mut enc = encrypt::run(b"hello", "hello.txt", &pw, &EncryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap();
        enc.container[0] = 0x00;
        let err = run(&enc.container, &pw, &DecryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap_err();
        assert!(matches!(err, SkitaError::BadMagic));
    }

    #[test]
    fn tampered_chunk_ciphertext_fails_auth() {
        let pw = Password::new("pw".to_string());
        let mut enc = encrypt::run(b"hello", "hello.txt", &pw, &EncryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap();
        let last = enc.container.len() - 1;
        enc.container[last] ^= 0xff;
        let err = run(&enc.container, &pw, &DecryptOptions::default(), &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap_err();
        assert!(matches!(err, SkitaError::AuthFailure));
    }
}
