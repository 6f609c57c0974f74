//! Configuration types for the Folio engine facades

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Top-level engine configuration.
///
/// Every field is serde-defaulted so a partial (or absent) TOML file yields a
/// working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory for on-disk state (saved indexes, synthesized audio).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub stt: SttConfig,

    #[serde(default)]
    pub tts: TtsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            index: IndexConfig::default(),
            llm: LlmConfig::default(),
            stt: SttConfig::default(),
            tts: TtsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Vector index facade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Embedding dimension used when creating a fresh index.
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Path the index is saved to / loaded from when none is given explicitly.
    #[serde(default)]
    pub index_path: Option<PathBuf>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            index_path: None,
        }
    }
}

/// LLM facade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    #[serde(default)]
    pub tokenizer_path: Option<PathBuf>,

    /// Unix socket of the LLM runtime daemon.
    #[serde(default = "default_llm_socket")]
    pub socket_path: PathBuf,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            tokenizer_path: None,
            socket_path: default_llm_socket(),
        }
    }
}

/// Speech-to-text facade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// Unix socket of the speech-recognition daemon.
    #[serde(default = "default_stt_socket")]
    pub socket_path: PathBuf,

    /// Sample rate the recognizer expects; PCM is forwarded untouched.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            socket_path: default_stt_socket(),
            sample_rate: default_sample_rate(),
        }
    }
}

/// Text-to-speech facade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    #[serde(default)]
    pub config_path: Option<PathBuf>,

    /// Unix socket of the speech-synthesis daemon.
    #[serde(default = "default_tts_socket")]
    pub socket_path: PathBuf,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            config_path: None,
            socket_path: default_tts_socket(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_dimension() -> usize {
    384
}

fn default_llm_socket() -> PathBuf {
    PathBuf::from("/tmp/folio_llm_daemon.sock")
}

fn default_stt_socket() -> PathBuf {
    PathBuf::from("/tmp/folio_stt_daemon.sock")
}

fn default_tts_socket() -> PathBuf {
    PathBuf::from("/tmp/folio_tts_daemon.sock")
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
