use std::sync::Arc;

use crate::models::config::MediaConstraints;
use crate::models::error::CaptureError;

/// Callback invoked when the stream delivers a buffer.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0]` with the channel count
/// reported by [`MediaStream::channels`]. Fires on a dedicated audio
/// thread, so keep processing minimal.
pub type SampleCallback = Arc<dyn Fn(&[f32]) + Send + Sync + 'static>;

/// Callback invoked when the underlying hardware stream dies mid-delivery.
pub type StreamErrorCallback = Arc<dyn Fn(&CaptureError) + Send + Sync + 'static>;

/// Permission collaborator: the platform's gateway to the microphone.
///
/// Implemented by platform backends (e.g. the cpal backend crate) and by
/// fakes in tests.
pub trait MediaDevices: Send {
    /// Whether platform capture support is present at all.
    fn is_supported(&self) -> bool;

    /// Request microphone access. Blocks until the platform grants or
    /// rejects the request; prompting UIs run until resolved (no timeout).
    fn request_microphone(
        &mut self,
        constraints: &MediaConstraints,
    ) -> Result<Box<dyn MediaStream>, CaptureError>;
}

/// A granted, live microphone stream.
///
/// The stream is owned by the platform; the session references it for the
/// session's lifetime and releases it on drop via [`MediaStream::stop`].
pub trait MediaStream: Send + Sync {
    /// Number of interleaved channels delivered per buffer.
    fn channels(&self) -> u16;

    /// Hardware sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Begin buffer delivery. `on_samples` fires per hardware buffer on a
    /// dedicated audio thread; `on_error` fires once if the stream dies.
    fn start(
        &mut self,
        on_samples: SampleCallback,
        on_error: StreamErrorCallback,
    ) -> Result<(), CaptureError>;

    /// Stop delivery and release the device.
    fn stop(&mut self);
}
