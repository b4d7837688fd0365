use crate::models::error::CaptureError;
use crate::processing::{sample_ops, wav_format};
use crate::traits::encoder::{ClipEncoder, EncodeSpec};

/// Stock in-memory WAV encoder.
///
/// Accumulates mono samples as 16-bit little-endian PCM and emits a
/// complete RIFF/WAV buffer on `finish`. The whole clip is held in
/// memory; voice samples are short.
#[derive(Debug, Clone, Default)]
pub struct WavClipEncoder {
    spec: Option<EncodeSpec>,
    pcm: Vec<u8>,
}

impl WavClipEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipEncoder for WavClipEncoder {
    fn begin(&mut self, spec: EncodeSpec) -> Result<(), CaptureError> {
        if spec.bit_depth != 16 {
            return Err(CaptureError::EncodingFailed(format!(
                "wav encoder supports 16-bit output, got {}",
                spec.bit_depth
            )));
        }
        if spec.channels != 1 {
            return Err(CaptureError::EncodingFailed(format!(
                "wav encoder expects a mono tap, got {} channels",
                spec.channels
            )));
        }
        self.spec = Some(spec);
        self.pcm.clear();
        Ok(())
    }

    fn feed(&mut self, samples: &[f32]) -> Result<(), CaptureError> {
        if self.spec.is_none() {
            return Err(CaptureError::EncodingFailed("feed before begin".into()));
        }
        self.pcm
            .extend_from_slice(&sample_ops::convert_to_int16_pcm(samples));
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, CaptureError> {
        let spec = self
            .spec
            .take()
            .ok_or_else(|| CaptureError::EncodingFailed("finish before begin".into()))?;

        let header = wav_format::generate_wav_header(
            spec.sample_rate,
            spec.bit_depth,
            spec.channels,
            self.pcm.len() as u32,
        );

        let mut out = Vec::with_capacity(wav_format::WAV_HEADER_SIZE + self.pcm.len());
        out.extend_from_slice(&header);
        out.append(&mut self.pcm);
        Ok(out)
    }

    fn container(&self) -> &str {
        "wav"
    }

    fn clone_box(&self) -> Box<dyn ClipEncoder> {
        Box::new(self.clone())
    }
}
