//! PCM marshaling helpers
//!
//! Audio crosses the daemon boundary as base64 of little-endian f32 samples.
//! Sample count and order are preserved exactly; no resampling happens here.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::Path;

use crate::error::{Error, Facade, Result};

/// Encode mono f32 PCM as base64 little-endian bytes.
pub fn encode_pcm(samples: &[f32]) -> String {
    let mut bytes = Vec::with_capacity(samples.len() * 4);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    BASE64.encode(bytes)
}

/// Decode base64 little-endian bytes back into f32 PCM.
pub fn decode_pcm(facade: Facade, encoded: &str) -> Result<Vec<f32>> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| Error::native(facade, format!("invalid base64 audio: {}", e)))?;

    if bytes.len() % 4 != 0 {
        return Err(Error::native(
            facade,
            format!("audio payload of {} bytes is not f32-aligned", bytes.len()),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Synthesized audio returned by the TTS facade.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Raw mono audio samples.
    pub samples: Vec<f32>,
    /// Sample rate of the output audio.
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Write the audio to a 32-bit float mono WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)
            .map_err(|e| Error::native(Facade::Tts, format!("failed to create WAV: {}", e)))?;
        for &sample in &self.samples {
            writer
                .write_sample(sample)
                .map_err(|e| Error::native(Facade::Tts, format!("failed to write WAV: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| Error::native(Facade::Tts, format!("failed to finalize WAV: {}", e)))?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcm_round_trip_preserves_order_and_count() {
        let samples = vec![0.0f32, -1.0, 1.0, 0.25, -0.125, f32::MIN_POSITIVE];
        let encoded = encode_pcm(&samples);
        let decoded = decode_pcm(Facade::Stt, &encoded).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn empty_pcm_encodes_to_empty() {
        assert_eq!(decode_pcm(Facade::Stt, &encode_pcm(&[])).unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn misaligned_payload_is_rejected() {
        let encoded = BASE64.encode([0u8, 1, 2]);
        let err = decode_pcm(Facade::Tts, &encoded).err().unwrap();
        assert!(matches!(err, Error::Native { facade: Facade::Tts, .. }));
    }

    #[test]
    fn wav_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let result = SynthesisResult {
            samples: vec![0.0, 0.5, -0.5],
            sample_rate: 24000,
        };
        result.write_wav(&path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24000);
        let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(read, result.samples);
    }

    #[test]
    fn duration_is_samples_over_rate() {
        let result = SynthesisResult {
            samples: vec![0.0; 48000],
            sample_rate: 24000,
        };
        assert!((result.duration_secs() - 2.0).abs() < f64::EPSILON);
    }
}
