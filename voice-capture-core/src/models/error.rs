use thiserror::Error;

/// Errors that can occur across the capture pipeline.
///
/// Everything except `UnsupportedPlatform` is recoverable at the caller's
/// discretion: permission and hardware errors allow a new access request,
/// stream interruptions return the recorder to idle, and invalid-state
/// errors leave the component untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("audio capture is not supported on this platform")]
    UnsupportedPlatform,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("hardware error: {0}")]
    HardwareError(String),

    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),
}

impl CaptureError {
    /// Whether the error leaves no retry path for the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unsupported_platform_is_fatal() {
        assert!(CaptureError::UnsupportedPlatform.is_fatal());
        assert!(!CaptureError::PermissionDenied.is_fatal());
        assert!(!CaptureError::StreamInterrupted("device unplugged".into()).is_fatal());
        assert!(!CaptureError::InvalidState("already recording".into()).is_fatal());
    }

    #[test]
    fn display_includes_detail() {
        let err = CaptureError::HardwareError("no input device".into());
        assert_eq!(err.to_string(), "hardware error: no input device");
    }
}
