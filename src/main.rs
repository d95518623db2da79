// skita - password-based file encryption with chunked AEAD.
//
// Key derivation: Argon2id. Chunk encryption: AES-256-GCM or
// ChaCha20-Poly1305. Container format: header + framed chunk records +
// optional whole-plaintext SHA-256 hash trailer.

mod cli;

use std::process;

fn main() {
    tracing_subscriber::fmt::init();

    let cli = cli::parse();
    if let Err(err) = cli::run_command(cli.command) {
        tracing::error!("{err:?}");
        eprintln!("Error: {err:?}");
        process::exit(1);
    }
}
