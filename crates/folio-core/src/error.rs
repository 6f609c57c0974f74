//! Error types for the Folio engine facades

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four wrapped native libraries, one fixed category code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facade {
    Index,
    Llm,
    Stt,
    Tts,
}

impl Facade {
    /// Fixed category code reported alongside every failure of this facade.
    pub fn code(&self) -> &'static str {
        match self {
            Facade::Index => "E_INDEX",
            Facade::Llm => "E_LLM",
            Facade::Stt => "E_STT",
            Facade::Tts => "E_TTS",
        }
    }
}

impl std::fmt::Display for Facade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Facade::Index => "index",
            Facade::Llm => "llm",
            Facade::Stt => "stt",
            Facade::Tts => "tts",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Operation attempted before create() or after cleanup().
    #[error("{facade} context is not initialized")]
    InvalidState { facade: Facade },

    /// The wrapped native library reported or threw an error.
    #[error("{facade} native call failed: {message}")]
    Native { facade: Facade, message: String },

    /// Malformed input rejected before it reaches the native side.
    #[error("{facade} invalid argument: {message}")]
    InvalidArgument { facade: Facade, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_state(facade: Facade) -> Self {
        Error::InvalidState { facade }
    }

    pub fn native(facade: Facade, message: impl Into<String>) -> Self {
        Error::Native {
            facade,
            message: message.into(),
        }
    }

    pub fn invalid_argument(facade: Facade, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            facade,
            message: message.into(),
        }
    }

    /// The facade this error belongs to, if any.
    pub fn facade(&self) -> Option<Facade> {
        match self {
            Error::InvalidState { facade }
            | Error::Native { facade, .. }
            | Error::InvalidArgument { facade, .. } => Some(*facade),
            _ => None,
        }
    }

    /// Category code carried on the wire: the facade code, or `E_CORE` for
    /// ambient failures.
    pub fn code(&self) -> &'static str {
        self.facade().map(|f| f.code()).unwrap_or("E_CORE")
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_codes_are_fixed_per_library() {
        assert_eq!(Facade::Index.code(), "E_INDEX");
        assert_eq!(Facade::Llm.code(), "E_LLM");
        assert_eq!(Facade::Stt.code(), "E_STT");
        assert_eq!(Facade::Tts.code(), "E_TTS");
    }

    #[test]
    fn error_code_falls_back_for_ambient_errors() {
        let err = Error::invalid_state(Facade::Tts);
        assert_eq!(err.code(), "E_TTS");

        let io: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert_eq!(io.code(), "E_CORE");
        assert!(io.facade().is_none());
    }
}
