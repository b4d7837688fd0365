use crate::models::error::CaptureError;

/// Parameters fixed for the duration of one encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
}

/// Opaque encoder collaborator.
///
/// Consumes mono `f32` samples and yields a complete encoded buffer in a
/// web-playable container. The recorder treats it as a black box: one
/// `begin`/`feed*`/`finish` cycle per clip, run on a worker thread. The
/// prototype held by the session is cloned per clip via `clone_box`.
pub trait ClipEncoder: Send {
    /// Start a new clip. Resets any state left by a previous cycle.
    fn begin(&mut self, spec: EncodeSpec) -> Result<(), CaptureError>;

    /// Append samples to the clip being encoded.
    fn feed(&mut self, samples: &[f32]) -> Result<(), CaptureError>;

    /// Finalize and return the complete container bytes.
    fn finish(&mut self) -> Result<Vec<u8>, CaptureError>;

    /// Container identifier (e.g. "wav"), recorded in clip metadata.
    fn container(&self) -> &str;

    /// Clone this encoder into a new boxed trait object.
    fn clone_box(&self) -> Box<dyn ClipEncoder>;
}

// Allow SessionConfig to clone its encoder prototype via trait object.
impl Clone for Box<dyn ClipEncoder> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
