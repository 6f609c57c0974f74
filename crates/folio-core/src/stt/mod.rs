//! Speech-to-text facade
//!
//! Wraps the speech-recognition engine. PCM input is mono f32; samples are
//! forwarded to the native side with count and order intact.

pub mod daemon;

pub use daemon::SttDaemonBackend;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::config::SttConfig;
use crate::error::{Error, Facade, Result};

/// Recognition task requested from the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    #[default]
    Transcribe,
    Translate,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Transcribe => "transcribe",
            Task::Translate => "translate",
        }
    }
}

/// Per-request recognition options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscribeOptions {
    /// Spoken language hint; autodetected when absent.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub task: Task,
}

/// Contract for speech-recognition backends.
pub trait SttBackend: Send {
    fn transcribe(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
        options: &TranscribeOptions,
    ) -> Result<String>;
}

/// Facade over one speech-recognition context.
pub struct SttContext {
    backend: Mutex<Option<Box<dyn SttBackend>>>,
}

impl SttContext {
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(None),
        }
    }

    /// Create a native context for the given model, replacing any live one.
    pub fn create(&self, config: &SttConfig, model_path: &Path) -> Result<()> {
        let backend = SttDaemonBackend::create(&config.socket_path, model_path)?;
        self.install(Box::new(backend));
        Ok(())
    }

    /// Install an already-constructed backend (test seam).
    pub fn install(&self, backend: Box<dyn SttBackend>) {
        let mut guard = self.backend.lock();
        *guard = Some(backend);
        debug!("stt context created");
    }

    /// Transcribe a PCM buffer.
    pub fn transcribe(
        &self,
        samples: &[f32],
        sample_rate: u32,
        options: &TranscribeOptions,
    ) -> Result<String> {
        if samples.is_empty() {
            return Err(Error::invalid_argument(Facade::Stt, "empty audio buffer"));
        }
        if sample_rate == 0 {
            return Err(Error::invalid_argument(Facade::Stt, "zero sample rate"));
        }
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Stt))?;
        backend.transcribe(samples, sample_rate, options)
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.lock().is_some()
    }

    /// Release the context. Idempotent.
    pub fn cleanup(&self) {
        let mut guard = self.backend.lock();
        if guard.take().is_some() {
            debug!("stt context released");
        }
    }
}

impl Default for SttContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcribe_before_create_fails_invalid_state() {
        let stt = SttContext::new();
        let err = stt
            .transcribe(&[0.0; 160], 16000, &TranscribeOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidState { facade: Facade::Stt }));
    }

    #[test]
    fn cleanup_without_create_is_a_noop() {
        let stt = SttContext::new();
        stt.cleanup();
        assert!(!stt.is_initialized());
    }

    #[test]
    fn empty_buffer_and_zero_rate_are_rejected() {
        let stt = SttContext::new();
        assert!(matches!(
            stt.transcribe(&[], 16000, &TranscribeOptions::default()),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            stt.transcribe(&[0.0; 160], 0, &TranscribeOptions::default()),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn task_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Task::Translate).unwrap(), "\"translate\"");
        assert_eq!(Task::default(), Task::Transcribe);
    }
}
