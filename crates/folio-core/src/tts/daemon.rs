//! Daemon-backed speech synthesis

use std::path::Path;
use tracing::{debug, warn};

use crate::audio::{decode_pcm, SynthesisResult};
use crate::bridge::{BridgeRequest, DaemonBridge};
use crate::error::{Error, Facade, Result};
use crate::tts::TtsBackend;

const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// TTS backend reaching the synthesis daemon over its Unix socket.
pub struct TtsDaemonBackend {
    bridge: DaemonBridge,
}

impl TtsDaemonBackend {
    /// Connect to the daemon and create a native context for the voice model.
    pub fn create(socket_path: &Path, model_path: &Path, config_path: &Path) -> Result<Self> {
        let bridge = DaemonBridge::connect(Facade::Tts, socket_path)?;

        let mut request = BridgeRequest::command("create_context");
        request.model_path = Some(model_path.to_string_lossy().into_owned());
        request.config_path = Some(config_path.to_string_lossy().into_owned());
        bridge.call(&request)?;

        debug!(model = %model_path.display(), "tts context created on daemon");
        Ok(Self { bridge })
    }
}

impl TtsBackend for TtsDaemonBackend {
    fn load(&mut self) -> Result<()> {
        self.bridge.call(&BridgeRequest::command("load_model"))?;
        Ok(())
    }

    fn synthesize(&mut self, text: &str) -> Result<SynthesisResult> {
        let mut request = BridgeRequest::command("synthesize");
        request.text = Some(text.to_string());

        let response = self.bridge.call(&request)?;
        let audio = response
            .audio_base64
            .ok_or_else(|| Error::native(Facade::Tts, "no audio in synthesize response"))?;
        let samples = decode_pcm(Facade::Tts, &audio)?;
        let sample_rate = response.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);

        debug!(samples = samples.len(), sample_rate, "synthesized audio");
        Ok(SynthesisResult {
            samples,
            sample_rate,
        })
    }
}

impl Drop for TtsDaemonBackend {
    fn drop(&mut self) {
        if let Err(e) = self.bridge.call(&BridgeRequest::command("release")) {
            warn!("failed to release tts context: {}", e);
        }
    }
}
