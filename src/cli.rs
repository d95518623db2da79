//! CLI commands and argument parsing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Password as PasswordPrompt;

use skita::config::{FILE_EXTENSION, PASSWORD_MIN_LENGTH};
use skita::pipeline::{DecryptOptions, EncryptOptions, Pipeline, decrypt, encrypt};
use skita::secret::Password;
use skita::types::{Algorithm, CancellationToken, ProgressSink};

/// Password-based file encryption with chunked AEAD.
#[derive(Parser)]
#[command(name = "skita")]
#[command(version)]
#[command(about = "Encrypt or decrypt a file into a self-describing .skita container.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file into a `.skita` container.
    Encrypt {
        /// Input file path.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to `<input>.skita`).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password (prompted for if not provided).
        #[arg(short, long)]
        password: Option<String>,

        /// Use ChaCha20-Poly1305 instead of the default AES-256-GCM.
        #[arg(long)]
        chacha20: bool,

        /// Seal chunks in parallel via a rayon thread pool.
        #[arg(long)]
        parallel: bool,
    },

    /// Decrypt a `.skita` container back to its original bytes.
    Decrypt {
        /// Input container path.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to the container's embedded filename).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Password (prompted for if not provided).
        #[arg(short, long)]
        password: Option<String>,

        /// Open chunks in parallel via a rayon thread pool.
        #[arg(long)]
        parallel: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn run_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Encrypt { input, output, password, chacha20, parallel } => encrypt_file(&input, output, password, chacha20, parallel),
        Commands::Decrypt { input, output, password, parallel } => decrypt_file(&input, output, password, parallel),
    }
}

struct IndicatifSink(ProgressBar);

impl ProgressSink for IndicatifSink {
    fn on_progress(&self, percent: u8, stage: &str) {
        self.0.set_position(u64::from(percent));
        self.0.set_message(stage.to_string());
    }
}

fn progress_bar() -> IndicatifSink {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}% {msg}") {
        bar.set_style(style);
    }
    IndicatifSink(bar)
}

fn prompt_password(action: &str) -> Result<Password> {
    let raw = PasswordPrompt::new(&format!("Password to {action}:"))
        .without_confirmation()
        .prompt()
        .context("failed to read password")?;

    if raw.len() < PASSWORD_MIN_LENGTH {
        bail!("password must be at least {PASSWORD_MIN_LENGTH} characters");
    }

    Ok(Password::new(raw))
}

fn encrypt_file(input: &Path, output: Option<PathBuf>, password: Option<String>, chacha20: bool, parallel: bool) -> Result<()> {
    let plaintext = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no filename component", input.display()))?;

    let password = match password {
        Some(p) => Password::new(p),
        None => prompt_password("encrypt with")?,
    };

    let options = EncryptOptions {
        algorithm: if chacha20 { Algorithm::ChaCha20Poly1305 } else { Algorithm::Aes256Gcm },
        parallel,
        ..EncryptOptions::default()
    };

    let sink = progress_bar();
    let output_path = output.unwrap_or_else(|| default_encrypt_output(input));

    let result = encrypt::run(&plaintext, &filename, &password, &options, &sink, &CancellationToken::new(), &Pipeline::new())
        .with_context(|| format!("encryption failed for {}", input.display()))?;
    sink.0.finish_with_message("done");

    fs::write(&output_path, &result.container).with_context(|| format!("writing {}", output_path.display()))?;

    println!("Encrypted: {} -> {}", input.display(), output_path.display());
    println!("Plaintext SHA-256: {}", result.plaintext_hash_hex);

    Ok(())
}

fn decrypt_file(input: &Path, output: Option<PathBuf>, password: Option<String>, parallel: bool) -> Result<()> {
    let container = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let password = match password {
        Some(p) => Password::new(p),
        None => prompt_password("decrypt with")?,
    };

    let options = DecryptOptions { parallel };
    let sink = progress_bar();

    let result = decrypt::run(&container, &password, &options, &sink, &CancellationToken::new(), &Pipeline::new())
        .with_context(|| format!("decryption failed for {}", input.display()))?;
    sink.0.finish_with_message("done");

    let output_path = output.unwrap_or_else(|| sanitized_output_path(input, &result.original_filename));
    fs::write(&output_path, &result.plaintext).with_context(|| format!("writing {}", output_path.display()))?;

    println!("Decrypted: {} -> {}", input.display(), output_path.display());
    if result.verified {
        println!("Integrity verified: {}", result.plaintext_hash_hex.unwrap_or_default());
    } else {
        println!("Warning: container has no embedded integrity hash (v1 format)");
    }

    Ok(())
}

fn default_encrypt_output(input: &Path) -> PathBuf {
    let mut output = input.as_os_str().to_owned();
    output.push(FILE_EXTENSION);
    PathBuf::from(output)
}

/// Builds an output path next to `input` from the container's embedded
/// filename, stripped to its final path component so the container can
/// never direct a write outside the chosen directory.
fn sanitized_output_path(input: &Path, embedded_filename: &str) -> PathBuf {
    let name = Path::new(embedded_filename).file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("decrypted.out"));

    input.parent().map(|dir| dir.join(&name)).unwrap_or(name)
}
