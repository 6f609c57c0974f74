//! Daemon-backed LLM runtime

use std::path::Path;
use tracing::{debug, warn};

use crate::bridge::{BridgeRequest, DaemonBridge};
use crate::error::{Error, Facade, Result};
use crate::llm::{GenerationParams, LlmBackend};

/// LLM backend reaching the runtime daemon over its Unix socket.
pub struct LlmDaemonBackend {
    bridge: DaemonBridge,
}

impl LlmDaemonBackend {
    /// Connect to the daemon and create a native context for the model.
    pub fn create(socket_path: &Path, model_path: &Path, tokenizer_path: &Path) -> Result<Self> {
        let bridge = DaemonBridge::connect(Facade::Llm, socket_path)?;

        let mut request = BridgeRequest::command("create_context");
        request.model_path = Some(model_path.to_string_lossy().into_owned());
        request.tokenizer_path = Some(tokenizer_path.to_string_lossy().into_owned());
        bridge.call(&request)?;

        debug!(model = %model_path.display(), "llm context created on daemon");
        Ok(Self { bridge })
    }
}

impl LlmBackend for LlmDaemonBackend {
    fn load(&mut self) -> Result<()> {
        self.bridge.call(&BridgeRequest::command("load_model"))?;
        Ok(())
    }

    fn generate(
        &mut self,
        prompt: &str,
        system_prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let mut request = BridgeRequest::command("generate");
        request.prompt = Some(prompt.to_string());
        request.system_prompt = Some(system_prompt.to_string());
        request.max_tokens = Some(params.max_tokens);
        request.temperature = Some(params.temperature);
        request.top_p = Some(params.top_p);

        let response = self.bridge.call(&request)?;
        response
            .text
            .ok_or_else(|| Error::native(Facade::Llm, "no text in generate response"))
    }

    fn embeddings(&mut self, text: &str) -> Result<Vec<f32>> {
        let mut request = BridgeRequest::command("embeddings");
        request.text = Some(text.to_string());

        let response = self.bridge.call(&request)?;
        response
            .embedding
            .ok_or_else(|| Error::native(Facade::Llm, "no embedding in response"))
    }
}

impl Drop for LlmDaemonBackend {
    fn drop(&mut self) {
        // Best-effort release of the native context; cleanup never fails
        // observably.
        if let Err(e) = self.bridge.call(&BridgeRequest::command("release")) {
            warn!("failed to release llm context: {}", e);
        }
    }
}
