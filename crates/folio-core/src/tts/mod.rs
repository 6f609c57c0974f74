//! Text-to-speech facade
//!
//! Wraps the speech-synthesis engine. Initialization is two-phase like the
//! LLM facade: `create` establishes the context, `load` pulls the voice model
//! into it. Output is raw mono f32 PCM.

pub mod daemon;

pub use daemon::TtsDaemonBackend;

use parking_lot::Mutex;
use std::path::Path;
use tracing::debug;

use crate::audio::SynthesisResult;
use crate::config::TtsConfig;
use crate::error::{Error, Facade, Result};

/// Contract for speech-synthesis backends.
pub trait TtsBackend: Send {
    /// Load the voice model into the created context.
    fn load(&mut self) -> Result<()>;

    fn synthesize(&mut self, text: &str) -> Result<SynthesisResult>;
}

/// Facade over one speech-synthesis context.
pub struct TtsContext {
    backend: Mutex<Option<Box<dyn TtsBackend>>>,
}

impl TtsContext {
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(None),
        }
    }

    /// Create a native context for the given model, replacing any live one.
    pub fn create(&self, config: &TtsConfig, model_path: &Path, config_path: &Path) -> Result<()> {
        let backend = TtsDaemonBackend::create(&config.socket_path, model_path, config_path)?;
        self.install(Box::new(backend));
        Ok(())
    }

    /// Install an already-constructed backend (test seam).
    pub fn install(&self, backend: Box<dyn TtsBackend>) {
        let mut guard = self.backend.lock();
        *guard = Some(backend);
        debug!("tts context created");
    }

    /// Load the voice model. Fails `InvalidState` before `create`.
    pub fn load(&self) -> Result<()> {
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Tts))?;
        backend.load()
    }

    /// Synthesize audio from text.
    pub fn synthesize(&self, text: &str) -> Result<SynthesisResult> {
        if text.is_empty() {
            return Err(Error::invalid_argument(Facade::Tts, "empty text"));
        }
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Tts))?;
        backend.synthesize(text)
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.lock().is_some()
    }

    /// Release the context. Idempotent.
    pub fn cleanup(&self) {
        let mut guard = self.backend.lock();
        if guard.take().is_some() {
            debug!("tts context released");
        }
    }
}

impl Default for TtsContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_before_create_fail_invalid_state() {
        let tts = TtsContext::new();
        assert!(matches!(
            tts.load(),
            Err(Error::InvalidState { facade: Facade::Tts })
        ));
        assert!(matches!(
            tts.synthesize("hello"),
            Err(Error::InvalidState { facade: Facade::Tts })
        ));
    }

    #[test]
    fn cleanup_without_create_is_a_noop() {
        let tts = TtsContext::new();
        tts.cleanup();
        tts.cleanup();
        assert!(!tts.is_initialized());
    }

    #[test]
    fn empty_text_is_rejected() {
        let tts = TtsContext::new();
        assert!(matches!(
            tts.synthesize(""),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
