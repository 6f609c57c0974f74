//! Daemon-backed speech recognition

use std::path::Path;
use tracing::{debug, warn};

use crate::audio::encode_pcm;
use crate::bridge::{BridgeRequest, DaemonBridge};
use crate::error::{Error, Facade, Result};
use crate::stt::{SttBackend, TranscribeOptions};

/// STT backend reaching the recognition daemon over its Unix socket.
pub struct SttDaemonBackend {
    bridge: DaemonBridge,
}

impl SttDaemonBackend {
    /// Connect to the daemon and create a native context for the model.
    pub fn create(socket_path: &Path, model_path: &Path) -> Result<Self> {
        let bridge = DaemonBridge::connect(Facade::Stt, socket_path)?;

        let mut request = BridgeRequest::command("create_context");
        request.model_path = Some(model_path.to_string_lossy().into_owned());
        bridge.call(&request)?;

        debug!(model = %model_path.display(), "stt context created on daemon");
        Ok(Self { bridge })
    }
}

impl SttBackend for SttDaemonBackend {
    fn transcribe(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
        options: &TranscribeOptions,
    ) -> Result<String> {
        let mut request = BridgeRequest::command("transcribe");
        request.audio_base64 = Some(encode_pcm(samples));
        request.sample_rate = Some(sample_rate);
        request.language = options.language.clone();
        request.task = Some(options.task.as_str().to_string());

        let response = self.bridge.call(&request)?;
        response
            .text
            .ok_or_else(|| Error::native(Facade::Stt, "no text in transcribe response"))
    }
}

impl Drop for SttDaemonBackend {
    fn drop(&mut self) {
        if let Err(e) = self.bridge.call(&BridgeRequest::command("release")) {
            warn!("failed to release stt context: {}", e);
        }
    }
}
