//! End-to-end scenarios from the container format's test matrix.

use skita::config::CHUNK_SIZE;
use skita::container::{Header, record};
use skita::crypto::{derive_chunk_key, derive_chunk_nonce};
use skita::pipeline::state::Pipeline;
use skita::pipeline::{DecryptOptions, EncryptOptions};
use skita::secret::Password;
use skita::types::{Algorithm, CancellationToken, KdfParams, NullProgress};

fn fast_kdf() -> KdfParams {
    // Real Argon2id defaults (64 MiB / 3 passes) are too slow for a test
    // suite run many times over; these parameters are still valid Argon2id
    // inputs, just cheap ones.
    KdfParams { memory_kib: 8 * 1024, time_cost: 1, parallelism: 1 }
}

fn encrypt(plaintext: &[u8], filename: &str, password: &str, options: EncryptOptions) -> skita::pipeline::EncryptOutput {
    let pw = Password::new(password.to_string());
    skita::pipeline::encrypt::run(plaintext, filename, &pw, &options, &NullProgress, &CancellationToken::new(), &Pipeline::new()).unwrap()
}

fn decrypt(container: &[u8], password: &str, options: DecryptOptions) -> Result<skita::pipeline::DecryptOutput, skita::error::SkitaError> {
    let pw = Password::new(password.to_string());
    skita::pipeline::decrypt::run(container, &pw, &options, &NullProgress, &CancellationToken::new(), &Pipeline::new())
}

fn default_options() -> EncryptOptions {
    EncryptOptions { kdf_params: fast_kdf(), ..EncryptOptions::default() }
}

#[test]
fn s1_tiny_roundtrip() {
    let enc = encrypt(b"hello", "hello.txt", "pw", default_options());
    assert_eq!(enc.plaintext_hash_hex, "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");

    let dec = decrypt(&enc.container, "pw", DecryptOptions::default()).unwrap();
    assert_eq!(dec.plaintext, b"hello");
    assert!(dec.verified);
    assert_eq!(dec.original_filename, "hello.txt");
}

#[test]
fn s4_wrong_password_never_returns_plaintext() {
    let enc = encrypt(b"secret", "f.bin", "alpha", default_options());
    let err = decrypt(&enc.container, "beta", DecryptOptions::default()).unwrap_err();
    assert!(matches!(err, skita::error::SkitaError::AuthFailure));
}

#[test]
fn s5_corrupted_magic_is_rejected() {
    let mut enc = encrypt(b"data", "f.bin", "pw", default_options());
    enc.container[0] = 0x00;
    let err = decrypt(&enc.container, "pw", DecryptOptions::default()).unwrap_err();
    assert!(matches!(err, skita::error::SkitaError::BadMagic));
}

#[test]
fn s6_unicode_filename_roundtrips_byte_exact() {
    let enc = encrypt(b"data", "笔记.md", "pw", default_options());
    let dec = decrypt(&enc.container, "pw", DecryptOptions::default()).unwrap();
    assert_eq!(dec.original_filename, "笔记.md");
}

#[test]
fn s2_exact_chunk_boundary_is_a_single_record() {
    let plaintext = vec![0xABu8; CHUNK_SIZE as usize];
    let enc = encrypt(&plaintext, "boundary.bin", "pw", default_options());

    let (header, header_len) = Header::parse(&enc.container).unwrap();
    assert_eq!(header.total_chunks, 1);

    let (_, ciphertext, consumed) = record::decode(&enc.container[header_len..]).unwrap();
    assert_eq!(ciphertext.len(), CHUNK_SIZE as usize + 16);
    assert_eq!(header_len + consumed, enc.container.len());

    let dec = decrypt(&enc.container, "pw", DecryptOptions::default()).unwrap();
    assert_eq!(dec.plaintext, plaintext);
    assert!(dec.verified);
}

#[test]
fn s3_just_over_one_chunk_splits_into_two_records_and_detects_tampering() {
    let plaintext = vec![0xCDu8; CHUNK_SIZE as usize + 1];
    let enc = encrypt(&plaintext, "over.bin", "pw", default_options());

    let (header, header_len) = Header::parse(&enc.container).unwrap();
    assert_eq!(header.total_chunks, 2);

    let body = &enc.container[header_len..];
    let (_, first_ciphertext, first_consumed) = record::decode(body).unwrap();
    assert_eq!(first_ciphertext.len(), CHUNK_SIZE as usize + 16);

    let (_, second_ciphertext, second_consumed) = record::decode(&body[first_consumed..]).unwrap();
    assert_eq!(second_ciphertext.len(), 17);
    assert_eq!(header_len + first_consumed + second_consumed, enc.container.len());

    let dec = decrypt(&enc.container, "pw", DecryptOptions::default()).unwrap();
    assert_eq!(dec.plaintext, plaintext);
    assert!(dec.verified);

    let mut tampered = enc.container.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0xff;
    let err = decrypt(&tampered, "pw", DecryptOptions::default()).unwrap_err();
    assert!(matches!(err, skita::error::SkitaError::AuthFailure));
}

#[test]
fn s7_cross_algorithm_mismatch_fails_auth() {
    let mut options = default_options();
    options.algorithm = Algorithm::ChaCha20Poly1305;
    let mut enc = encrypt(b"secret payload", "f.bin", "pw", options);

    // Flip the algorithm id byte at offset 6 from ChaCha20-Poly1305 (1) to AES-GCM (0).
    enc.container[6] = 0;

    let err = decrypt(&enc.container, "pw", DecryptOptions::default()).unwrap_err();
    assert!(matches!(err, skita::error::SkitaError::AuthFailure));
}

#[test]
fn tampering_with_last_chunk_byte_fails_auth() {
    let enc = encrypt(&vec![7u8; 64], "f.bin", "pw", default_options());
    let mut container = enc.container;
    let last = container.len() - 1;
    container[last] ^= 0xff;
    let err = decrypt(&container, "pw", DecryptOptions::default()).unwrap_err();
    assert!(matches!(err, skita::error::SkitaError::AuthFailure));
}

#[test]
fn parallel_and_sequential_encryption_decrypt_to_the_same_plaintext() {
    let plaintext: Vec<u8> = (0u32..100_000).map(|i| i as u8).collect();

    let mut parallel_options = default_options();
    parallel_options.parallel = true;
    let enc_parallel = encrypt(&plaintext, "big.bin", "pw", parallel_options);
    let enc_sequential = encrypt(&plaintext, "big.bin", "pw", default_options());

    let dec_from_parallel = decrypt(&enc_parallel.container, "pw", DecryptOptions { parallel: true }).unwrap();
    let dec_from_sequential = decrypt(&enc_sequential.container, "pw", DecryptOptions::default()).unwrap();

    assert_eq!(dec_from_parallel.plaintext, plaintext);
    assert_eq!(dec_from_sequential.plaintext, plaintext);
}

#[test]
fn chunk_key_and_nonce_derivation_are_pure_functions() {
    let master = [1u8; 32];
    let master_nonce = [2u8; 12];
    assert_eq!(derive_chunk_key(&master, 3), derive_chunk_key(&master, 3));
    assert_eq!(derive_chunk_nonce(&master_nonce, 3), derive_chunk_nonce(&master_nonce, 3));
}
