//! cpal input stream wrapped as a core `MediaStream`.
//!
//! The cpal stream handle is not `Send` on every platform, so a dedicated
//! capture thread owns it for its whole life: the thread opens the device,
//! plays the stream, then parks until stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;

use voice_capture_core::models::error::CaptureError;
use voice_capture_core::traits::media::{MediaStream, SampleCallback, StreamErrorCallback};

use crate::media_devices::find_input_device;

/// A granted microphone stream on the default cpal host.
pub struct CpalMediaStream {
    device_id: Option<String>,
    channels: u16,
    sample_rate: u32,
    running: Arc<AtomicBool>,
    capture_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl CpalMediaStream {
    pub(crate) fn new(device_id: Option<String>, channels: u16, sample_rate: u32) -> Self {
        Self {
            device_id,
            channels,
            sample_rate,
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        }
    }
}

impl MediaStream for CpalMediaStream {
    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start(
        &mut self,
        on_samples: SampleCallback,
        on_error: StreamErrorCallback,
    ) -> Result<(), CaptureError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(CaptureError::InvalidState("stream already started".into()));
        }

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let device_id = self.device_id.clone();

        let handle = thread::Builder::new()
            .name("cpal-capture".into())
            .spawn(move || {
                if let Err(e) = capture_loop(device_id, &running, on_samples, &on_error) {
                    log::error!("capture thread failed: {}", e);
                    on_error(&e);
                }
                running.store(false, Ordering::SeqCst);
            })
            .map_err(|e| CaptureError::HardwareError(format!("failed to spawn capture thread: {}", e)))?;

        *self.capture_handle.lock() = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_handle.lock().take() {
            let _ = handle.join();
        }
    }
}

/// Main capture loop running on a dedicated thread.
///
/// Opens the device, builds an f32 input stream delivering buffers via
/// `on_samples`, then sleeps until `running` clears. Stream errors raised
/// by cpal's error callback surface through `on_error` as
/// `StreamInterrupted`.
fn capture_loop(
    device_id: Option<String>,
    running: &AtomicBool,
    on_samples: SampleCallback,
    on_error: &StreamErrorCallback,
) -> Result<(), CaptureError> {
    let host = cpal::default_host();

    let device = match device_id {
        Some(ref id) => find_input_device(&host, id)
            .ok_or_else(|| CaptureError::HardwareError(format!("input device not found: {}", id)))?,
        None => host
            .default_input_device()
            .ok_or_else(|| CaptureError::HardwareError("no input device available".into()))?,
    };

    let supported = device
        .default_input_config()
        .map_err(|e| CaptureError::HardwareError(format!("failed to query input config: {}", e)))?;
    let config: cpal::StreamConfig = supported.into();

    let stream_error = Arc::clone(on_error);
    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                on_samples(data);
            },
            move |err: cpal::StreamError| {
                stream_error(&CaptureError::StreamInterrupted(err.to_string()));
            },
            None, // no timeout
        )
        .map_err(|e| CaptureError::HardwareError(format!("failed to build input stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| CaptureError::HardwareError(format!("failed to start input stream: {}", e)))?;

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(50));
    }

    Ok(())
}
