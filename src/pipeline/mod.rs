//! Encrypt/decrypt orchestration: chunking, progress, cancellation, state.

pub mod decrypt;
pub mod encrypt;
pub mod state;

pub use decrypt::{DecryptOptions, DecryptOutput};
pub use encrypt::{EncryptOptions, EncryptOutput};
pub use state::Pipeline;
