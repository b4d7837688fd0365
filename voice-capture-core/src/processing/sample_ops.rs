//! Pure sample math shared by the recorder and the visual pipeline.
//!
//! All helpers operate on `&[f32]` buffers in `[-1.0, 1.0]` with no
//! platform dependencies.

/// Convert f32 samples `[-1.0, 1.0]` to 16-bit PCM (little-endian bytes).
///
/// Clamps out-of-range values. Output length = `samples.len() * 2` bytes.
pub fn convert_to_int16_pcm(samples: &[f32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let int16_value = (clamped * i16::MAX as f32) as i16;
        data.extend_from_slice(&int16_value.to_le_bytes());
    }
    data
}

/// Map f32 samples to unsigned time-domain bytes, 128 = zero crossing.
///
/// `byte = (sample + 1) * 128`, clamped to `[0, 255]`: -1.0 → 0,
/// 0.0 → 128, 1.0 → 255. If `samples` is shorter than `out`, the tail
/// reads as silence (128).
pub fn byte_time_domain(samples: &[f32], out: &mut [u8]) {
    out.fill(128);
    for (slot, &sample) in out.iter_mut().zip(samples) {
        let scaled = (sample.clamp(-1.0, 1.0) + 1.0) * 128.0;
        *slot = scaled.min(255.0) as u8;
    }
}

/// RMS level of samples (0.0–1.0 for normalized audio).
pub fn rms_level(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Peak absolute level of samples.
pub fn peak_level(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}
