//! # voice-capture-core
//!
//! Platform-agnostic voice-sample capture core library.
//!
//! Turns a raw microphone stream into independent mono signal taps, records
//! taps into encoded clips, and drives a live time-domain waveform render
//! loop. Platform backends (e.g. `voice-capture-cpal`) implement the
//! `MediaDevices`/`MediaStream` traits and plug into the generic
//! `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! voice-capture-core (this crate)
//! ├── traits/       ← MediaDevices, MediaStream, ClipEncoder, RecorderDelegate,
//! │                   DrawSurface, ClipUploader
//! ├── models/       ← CaptureError, SessionState, RecorderState, SessionConfig,
//! │                   EncodedClip, ClipNamer
//! ├── processing/   ← SampleWindow, sample math, WAV header generation
//! ├── graph/        ← SignalGraph channel splitter, SignalTap fan-out
//! ├── record/       ← ClipRecorder, stock WavClipEncoder
//! ├── visual/       ← TimeDomainAnalyser, WaveformVisualizer, RenderLoop
//! └── session/      ← CaptureSession (generic orchestrator)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use voice_capture_core::{CaptureSession, SessionConfig, VisualizerSpec};
//!
//! let config = SessionConfig {
//!     visualizers: vec![VisualizerSpec::new(2048, Box::new(canvas))],
//!     ..Default::default()
//! };
//! let mut session = CaptureSession::new(backend, config)?;
//! session.request_access()?;
//! session.recorders()[0].set_delegate(ui_delegate);
//! let render = session.start_render_loop()?;
//! ```

pub mod graph;
pub mod models;
pub mod processing;
pub mod record;
pub mod session;
pub mod traits;
pub mod visual;

// Re-export key types at crate root for convenience.
pub use graph::{SignalGraph, SignalTap, TapSink};
pub use models::clip::{ClipMetadata, ClipNamer, EncodedClip};
pub use models::config::{MediaConstraints, SessionConfig, VisualizerSpec};
pub use models::error::CaptureError;
pub use models::state::{RecorderState, SessionState};
pub use record::{ClipRecorder, WavClipEncoder};
pub use session::CaptureSession;
pub use traits::delegate::RecorderDelegate;
pub use traits::encoder::{ClipEncoder, EncodeSpec};
pub use traits::media::{MediaDevices, MediaStream, SampleCallback, StreamErrorCallback};
pub use traits::surface::DrawSurface;
pub use traits::uploader::ClipUploader;
pub use visual::{RenderLoop, TimeDomainAnalyser, WaveformVisualizer, DEFAULT_FRAME_INTERVAL};
