//! Shared types: algorithm identifiers, progress reporting, cancellation.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config;
use crate::error::SkitaError;

/// The AEAD algorithm a container was (or will be) sealed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Aes256Gcm,
    ChaCha20Poly1305,
}

impl Algorithm {
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            Self::Aes256Gcm => config::ALGORITHM_AES_256_GCM,
            Self::ChaCha20Poly1305 => config::ALGORITHM_CHACHA20_POLY1305,
        }
    }

    #[inline]
    pub fn from_id(id: u8) -> std::result::Result<Self, SkitaError> {
        match id {
            config::ALGORITHM_AES_256_GCM => Ok(Self::Aes256Gcm),
            config::ALGORITHM_CHACHA20_POLY1305 => Ok(Self::ChaCha20Poly1305),
            other => Err(SkitaError::UnsupportedAlgorithm(other)),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Aes256Gcm => "AES-256-GCM",
            Self::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        })
    }
}

/// Argon2id cost parameters, written into every container header.
#[derive(Clone, Copy, Debug)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub time_cost: u32,
    pub parallelism: u8,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: config::ARGON_MEMORY,
            time_cost: config::ARGON_TIME,
            parallelism: config::ARGON_PARALLELISM,
        }
    }
}

/// Lifecycle of a single pipeline run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PipelineStatus {
    Idle,
    Processing,
    Success,
    Error,
    Cancelled,
}

/// Receives progress updates from a running pipeline.
///
/// Implementors decide how to render `percent` (0..=100) and `stage`; the
/// pipeline itself never touches a terminal or a progress bar directly.
pub trait ProgressSink {
    fn on_progress(&self, percent: u8, stage: &str);
}

/// A `ProgressSink` that discards every update.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&self, _percent: u8, _stage: &str) {}
}

/// Cooperative cancellation flag shared between a caller and a running pipeline.
///
/// Checked between chunks, never pre-empting mid-chunk work.
#[derive(Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self { flag: Arc::new(AtomicBool::new(false)) }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
