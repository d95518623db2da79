//! `Idle -> Processing -> {Success | Error | Cancelled}` state tracking.

use std::sync::{Arc, Mutex};

use crate::types::PipelineStatus;

/// A handle a caller can poll to observe one encrypt/decrypt call's lifecycle.
///
/// `Error` and `Cancelled` are terminal for that call; a fresh `Pipeline`
/// is needed for the next one.
#[derive(Clone)]
pub struct Pipeline {
    status: Arc<Mutex<PipelineStatus>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { status: Arc::new(Mutex::new(PipelineStatus::Idle)) }
    }

    pub fn status(&self) -> PipelineStatus {
        *self.status.lock().expect("pipeline status mutex poisoned")
    }

    pub(crate) fn set(&self, status: PipelineStatus) {
        *self.status.lock().expect("pipeline status mutex poisoned") = status;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
