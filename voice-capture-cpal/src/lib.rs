//! # voice-capture-cpal
//!
//! cpal microphone backend for voice-capture-kit.
//!
//! Provides:
//! - `CpalMediaDevices` — permission collaborator over the system default host
//! - `CpalMediaStream` — granted input stream delivering f32 buffers on a
//!   dedicated capture thread
//!
//! ## Usage
//! ```ignore
//! use voice_capture_core::{CaptureSession, SessionConfig};
//! use voice_capture_cpal::CpalMediaDevices;
//!
//! let mut session = CaptureSession::new(CpalMediaDevices::new(), config)?;
//! session.request_access()?;
//! ```

pub mod media_devices;
pub mod media_stream;

pub use media_devices::CpalMediaDevices;
pub use media_stream::CpalMediaStream;
