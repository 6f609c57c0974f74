//! Folio Core - Native ML engine facades
//!
//! This crate exposes the four native engines behind the Folio reading
//! companion (a flat vector index, an LLM runtime, a speech-to-text engine
//! and a speech-synthesis engine) as independent facades with a uniform
//! error taxonomy.
//!
//! # Architecture
//!
//! Each facade owns at most one live backend behind a mutex (`None` is the
//! null sentinel). Operations fail with `InvalidState` before creation or
//! after cleanup; native failures surface as `Native` with the facade's fixed
//! category code. The LLM, STT and TTS runtimes stay out-of-process and are
//! reached over a length-prefixed JSON Unix-socket protocol; the backend
//! traits are the seam where a linked native binding would plug in instead.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{VectorIndex, SearchHit};
//!
//! let index = VectorIndex::new();
//! index.create(384)?;
//! index.add_embedding(&embedding)?;
//! let hits: Vec<SearchHit> = index.search(&query, 5)?;
//! index.cleanup();
//! ```

pub mod audio;
pub mod bridge;
pub mod config;
pub mod error;
pub mod index;
pub mod llm;
pub mod stt;
pub mod tts;

pub use audio::{decode_pcm, encode_pcm, SynthesisResult};
pub use config::{EngineConfig, IndexConfig, LlmConfig, ServerConfig, SttConfig, TtsConfig};
pub use error::{Error, Facade, Result};
pub use index::{IndexBackend, SearchHit, VectorIndex};
pub use llm::{GenerationParams, LlmBackend, LlmContext};
pub use stt::{SttBackend, SttContext, Task, TranscribeOptions};
pub use tts::{TtsBackend, TtsContext};
