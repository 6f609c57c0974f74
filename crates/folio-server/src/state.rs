//! Application state management

use folio_core::{EngineConfig, LlmContext, SttContext, TtsContext, VectorIndex};
use std::sync::Arc;

/// Shared application state: one facade per native engine.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EngineConfig>,
    pub index: Arc<VectorIndex>,
    pub llm: Arc<LlmContext>,
    pub stt: Arc<SttContext>,
    pub tts: Arc<TtsContext>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
            index: Arc::new(VectorIndex::new()),
            llm: Arc::new(LlmContext::new()),
            stt: Arc::new(SttContext::new()),
            tts: Arc::new(TtsContext::new()),
        }
    }
}
