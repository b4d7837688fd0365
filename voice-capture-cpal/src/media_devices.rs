//! cpal-backed permission collaborator.
//!
//! Desktop platforms have no browser-style consent prompt; a request
//! succeeds when an input device can be opened. On platforms that gate
//! microphone access (macOS TCC), the OS prompt fires when the stream is
//! first built.

use cpal::traits::{DeviceTrait, HostTrait};

use voice_capture_core::models::config::MediaConstraints;
use voice_capture_core::models::error::CaptureError;
use voice_capture_core::traits::media::{MediaDevices, MediaStream};

use crate::media_stream::CpalMediaStream;

/// Microphone access via the system default cpal host.
#[derive(Debug, Default)]
pub struct CpalMediaDevices;

impl CpalMediaDevices {
    pub fn new() -> Self {
        Self
    }
}

impl MediaDevices for CpalMediaDevices {
    fn is_supported(&self) -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn request_microphone(
        &mut self,
        constraints: &MediaConstraints,
    ) -> Result<Box<dyn MediaStream>, CaptureError> {
        let host = cpal::default_host();

        let device = match &constraints.device_id {
            Some(id) => find_input_device(&host, id)
                .ok_or_else(|| CaptureError::HardwareError(format!("input device not found: {}", id)))?,
            None => host
                .default_input_device()
                .ok_or_else(|| CaptureError::HardwareError("no input device available".into()))?,
        };

        let supported = device
            .default_input_config()
            .map_err(|e| CaptureError::HardwareError(format!("failed to query input config: {}", e)))?;

        if constraints.echo_cancellation {
            // cpal delivers the unprocessed signal; there is nothing to enable.
            log::warn!("echo cancellation requested but not available via cpal");
        }

        let name = device.name().unwrap_or_else(|_| "unknown".into());
        log::info!(
            "microphone granted: {} ({} ch @ {} Hz)",
            name,
            supported.channels(),
            supported.sample_rate().0
        );

        Ok(Box::new(CpalMediaStream::new(
            constraints.device_id.clone(),
            supported.channels(),
            supported.sample_rate().0,
        )))
    }
}

/// Locate an input device by name.
pub(crate) fn find_input_device(host: &cpal::Host, id: &str) -> Option<cpal::Device> {
    host.input_devices()
        .ok()?
        .find(|device| device.name().map(|name| name == id).unwrap_or(false))
}
