/// Capture session permission state machine.
///
/// State transitions:
/// ```text
/// uninitialized → requesting-permission → ready
///                          ↓
///                       denied  (re-enters requesting-permission on retry)
/// ```
///
/// `ready` is one-shot: a session never leaves it. `denied` allows a new
/// access request, since a user may grant permission on a later attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    RequestingPermission,
    Ready,
    Denied,
}

impl SessionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied)
    }

    /// Whether `request_access` may be called from this state.
    pub fn can_request(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Denied)
    }
}

/// Recorder state machine.
///
/// A recorder is always in exactly one of these states; transitions happen
/// only via explicit `start`/`stop` calls or a stream error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

impl RecorderState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }
}
