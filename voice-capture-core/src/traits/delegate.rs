use crate::models::clip::EncodedClip;
use crate::models::error::CaptureError;

/// Event delegate for recorder lifecycle notifications.
///
/// `on_start` and `on_stop` are called from the thread that drove the
/// transition; `on_data_available` and `on_error` are called from the
/// encode worker thread. Implementations should marshal to the UI thread
/// if needed.
///
/// Ordering guarantee: for one recording, events arrive
/// `on_start` → `on_stop` → `on_data_available`, never interleaved with
/// another `on_start` of the same recorder.
pub trait RecorderDelegate: Send + Sync {
    /// The recorder transitioned idle → recording.
    fn on_start(&self);

    /// The recorder transitioned recording → idle.
    fn on_stop(&self);

    /// Encoding completed; `clip` is the finished, playable buffer.
    fn on_data_available(&self, clip: &EncodedClip);

    /// The underlying stream died mid-recording. The recorder is already
    /// back in idle and no data will be emitted for this attempt.
    fn on_stream_error(&self, error: &CaptureError);

    /// The encoder collaborator failed; no data for this attempt.
    fn on_error(&self, error: &CaptureError);
}
