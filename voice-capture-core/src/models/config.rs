use crate::traits::encoder::ClipEncoder;
use crate::traits::surface::DrawSurface;

/// Smallest analysis window accepted by the time-domain analyser.
pub const MIN_ANALYSIS_WINDOW: usize = 32;
/// Largest analysis window accepted by the time-domain analyser.
pub const MAX_ANALYSIS_WINDOW: usize = 32768;

/// Constraints passed to the platform when requesting the microphone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConstraints {
    /// Whether the platform may apply echo cancellation. Voice-sample
    /// collection wants the unprocessed signal, so this defaults to off.
    pub echo_cancellation: bool,

    /// Specific input device ID, or None for the system default.
    pub device_id: Option<String>,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            echo_cancellation: false,
            device_id: None,
        }
    }
}

/// Per-tap visualizer configuration, supplied positionally: the spec at
/// index `i` configures the visualizer observing tap `i`.
pub struct VisualizerSpec {
    /// Time-domain analysis window in samples. Must be a power of two in
    /// `[MIN_ANALYSIS_WINDOW, MAX_ANALYSIS_WINDOW]`.
    pub analysis_window: usize,

    /// Surface the waveform is rendered onto. Dimensions are fixed for the
    /// visualizer's lifetime.
    pub surface: Box<dyn DrawSurface>,
}

impl VisualizerSpec {
    pub fn new(analysis_window: usize, surface: Box<dyn DrawSurface>) -> Self {
        Self {
            analysis_window,
            surface,
        }
    }
}

/// Configuration for a capture session.
pub struct SessionConfig {
    /// Number of input channels to split into taps (1 or 2).
    pub channel_count: u16,

    /// Bit depth of encoded clips. The stock WAV encoder supports 16.
    pub bit_depth: u16,

    /// Constraints forwarded to the permission request.
    pub constraints: MediaConstraints,

    /// Encoder prototype cloned for every clip. None selects the stock
    /// in-memory WAV encoder.
    pub encoder: Option<Box<dyn ClipEncoder>>,

    /// One visualizer spec per requested channel, index-aligned with the
    /// tap list.
    pub visualizers: Vec<VisualizerSpec>,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=2).contains(&self.channel_count) {
            return Err(format!("unsupported channel count: {}", self.channel_count));
        }
        if self.bit_depth != 16 {
            return Err(format!("unsupported bit depth: {}", self.bit_depth));
        }
        if self.visualizers.len() != self.channel_count as usize {
            return Err(format!(
                "expected {} visualizer spec(s), got {}",
                self.channel_count,
                self.visualizers.len()
            ));
        }
        for (i, spec) in self.visualizers.iter().enumerate() {
            let window = spec.analysis_window;
            if !window.is_power_of_two()
                || !(MIN_ANALYSIS_WINDOW..=MAX_ANALYSIS_WINDOW).contains(&window)
            {
                return Err(format!("invalid analysis window for tap {}: {}", i, window));
            }
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channel_count: 1,
            bit_depth: 16,
            constraints: MediaConstraints::default(),
            encoder: None,
            visualizers: Vec::new(),
        }
    }
}
