//! LLM facade
//!
//! Wraps the text-generation runtime. Initialization is two-phase, matching
//! the native library: `create` establishes the context, `load` pulls the
//! model weights into it. Generation and embedding extraction require both.

pub mod daemon;

pub use daemon::LlmDaemonBackend;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::{Error, Facade, Result};

/// Sampling parameters for text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

/// Contract for LLM runtime backends.
pub trait LlmBackend: Send {
    /// Load model weights into the created context.
    fn load(&mut self) -> Result<()>;

    fn generate(
        &mut self,
        prompt: &str,
        system_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String>;

    fn embeddings(&mut self, text: &str) -> Result<Vec<f32>>;
}

/// Facade over one LLM runtime context.
pub struct LlmContext {
    backend: Mutex<Option<Box<dyn LlmBackend>>>,
}

impl LlmContext {
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(None),
        }
    }

    /// Create a native context for the given model, replacing any live one.
    pub fn create(&self, config: &LlmConfig, model_path: &Path, tokenizer_path: &Path) -> Result<()> {
        let backend = LlmDaemonBackend::create(&config.socket_path, model_path, tokenizer_path)?;
        self.install(Box::new(backend));
        Ok(())
    }

    /// Install an already-constructed backend (test seam).
    pub fn install(&self, backend: Box<dyn LlmBackend>) {
        let mut guard = self.backend.lock();
        *guard = Some(backend);
        debug!("llm context created");
    }

    /// Load model weights. Fails `InvalidState` before `create`.
    pub fn load(&self) -> Result<()> {
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Llm))?;
        backend.load()
    }

    /// Run text generation.
    pub fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        if prompt.is_empty() {
            return Err(Error::invalid_argument(Facade::Llm, "empty prompt"));
        }
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Llm))?;
        backend.generate(prompt, system_prompt, params)
    }

    /// Extract an embedding vector for the given text.
    pub fn embeddings(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(Error::invalid_argument(Facade::Llm, "empty text"));
        }
        let mut guard = self.backend.lock();
        let backend = guard
            .as_mut()
            .ok_or_else(|| Error::invalid_state(Facade::Llm))?;
        backend.embeddings(text)
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.lock().is_some()
    }

    /// Release the context. Idempotent; the backend's Drop notifies the
    /// native side best-effort.
    pub fn cleanup(&self) {
        let mut guard = self.backend.lock();
        if guard.take().is_some() {
            debug!("llm context released");
        }
    }
}

impl Default for LlmContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_before_create_fail_invalid_state() {
        let llm = LlmContext::new();
        assert!(matches!(
            llm.load(),
            Err(Error::InvalidState { facade: Facade::Llm })
        ));
        assert!(matches!(
            llm.generate("hi", "", &GenerationParams::default()),
            Err(Error::InvalidState { facade: Facade::Llm })
        ));
        assert!(matches!(
            llm.embeddings("hi"),
            Err(Error::InvalidState { facade: Facade::Llm })
        ));
    }

    #[test]
    fn cleanup_without_create_is_a_noop() {
        let llm = LlmContext::new();
        llm.cleanup();
        llm.cleanup();
        assert!(!llm.is_initialized());
    }

    #[test]
    fn empty_prompt_is_rejected_before_state_check() {
        let llm = LlmContext::new();
        assert!(matches!(
            llm.generate("", "", &GenerationParams::default()),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            llm.embeddings(""),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn default_sampling_params() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 512);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
        assert!((params.top_p - 0.95).abs() < f32::EPSILON);
    }
}
