//! Unix-socket bridge to the native engine daemons
//!
//! The LLM, STT and TTS runtimes stay out-of-process; each facade reaches its
//! daemon over a Unix socket speaking length-prefixed JSON (u32 big-endian
//! length, then the message body). The same framing is used in both
//! directions, and a response carrying an `error` field is surfaced as a
//! [`Error::Native`] for the owning facade.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Facade, Result};

const READ_TIMEOUT: Duration = Duration::from_secs(120);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Request to an engine daemon.
///
/// One struct covers every facade; unused fields are skipped on the wire.
#[derive(Debug, Default, Serialize)]
pub struct BridgeRequest {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenizer_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl BridgeRequest {
    pub fn command(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Default::default()
        }
    }
}

/// Response from an engine daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeResponse {
    pub status: Option<String>,
    pub error: Option<String>,
    pub text: Option<String>,
    pub embedding: Option<Vec<f32>>,
    pub audio_base64: Option<String>,
    pub sample_rate: Option<u32>,
}

/// Connection point for one facade's daemon.
pub struct DaemonBridge {
    facade: Facade,
    socket_path: PathBuf,
}

impl DaemonBridge {
    /// Connect to the daemon and verify it responds to a `check` command.
    pub fn connect(facade: Facade, socket_path: &Path) -> Result<Self> {
        let bridge = Self {
            facade,
            socket_path: socket_path.to_path_buf(),
        };
        let response = bridge.call(&BridgeRequest::command("check"))?;
        debug!(
            facade = %facade,
            status = response.status.as_deref().unwrap_or("unknown"),
            "daemon handshake ok"
        );
        Ok(bridge)
    }

    pub fn facade(&self) -> Facade {
        self.facade
    }

    /// Send one request and wait for the daemon's response.
    pub fn call(&self, request: &BridgeRequest) -> Result<BridgeResponse> {
        let mut stream = UnixStream::connect(&self.socket_path).map_err(|e| {
            Error::native(
                self.facade,
                format!("failed to connect to engine daemon: {}", e),
            )
        })?;
        self.send_request(&mut stream, request)
    }

    fn send_request(
        &self,
        stream: &mut UnixStream,
        request: &BridgeRequest,
    ) -> Result<BridgeResponse> {
        stream.set_read_timeout(Some(READ_TIMEOUT)).ok();
        stream.set_write_timeout(Some(WRITE_TIMEOUT)).ok();

        let request_json = serde_json::to_vec(request)
            .map_err(|e| Error::native(self.facade, format!("failed to serialize request: {}", e)))?;

        let length = (request_json.len() as u32).to_be_bytes();
        stream
            .write_all(&length)
            .map_err(|e| Error::native(self.facade, format!("failed to write length: {}", e)))?;
        stream
            .write_all(&request_json)
            .map_err(|e| Error::native(self.facade, format!("failed to write request: {}", e)))?;

        let mut length_buf = [0u8; 4];
        stream.read_exact(&mut length_buf).map_err(|e| {
            Error::native(self.facade, format!("failed to read response length: {}", e))
        })?;
        let response_length = u32::from_be_bytes(length_buf) as usize;

        let mut response_buf = vec![0u8; response_length];
        stream
            .read_exact(&mut response_buf)
            .map_err(|e| Error::native(self.facade, format!("failed to read response: {}", e)))?;

        let response: BridgeResponse = serde_json::from_slice(&response_buf)
            .map_err(|e| Error::native(self.facade, format!("failed to parse response: {}", e)))?;

        if let Some(error) = &response.error {
            return Err(Error::native(self.facade, error.clone()));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_fields_stay_off_the_wire() {
        let mut request = BridgeRequest::command("generate");
        request.prompt = Some("hello".to_string());
        request.max_tokens = Some(64);

        let json = serde_json::to_value(&request).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["command"], "generate");
        assert!(!obj.contains_key("audio_base64"));
    }

    #[test]
    fn connect_to_missing_socket_is_native_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DaemonBridge::connect(Facade::Llm, &dir.path().join("no-such.sock"))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Native { facade: Facade::Llm, .. }));
    }
}
