use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::graph::tap::TapSink;
use crate::models::clip::EncodedClip;
use crate::models::error::CaptureError;
use crate::models::state::RecorderState;
use crate::processing::sample_ops;
use crate::traits::delegate::RecorderDelegate;
use crate::traits::encoder::{ClipEncoder, EncodeSpec};

/// Records one signal tap into encoded clips.
///
/// Always in exactly one of {idle, recording}; transitions only via
/// `start`/`stop` or a stream error. Samples accumulate while recording;
/// `stop` hands them to a per-clip encode worker that fires
/// `on_data_available` when the container is complete. At most one encode
/// is in flight at a time: a `start` during recording or encoding is
/// rejected, never queued.
pub struct ClipRecorder {
    channel: u16,
    spec: EncodeSpec,
    encoder: Mutex<Box<dyn ClipEncoder>>,
    state: Mutex<RecorderState>,
    buffer: Arc<Mutex<Vec<f32>>>,
    delegate: Mutex<Option<Arc<dyn RecorderDelegate>>>,
    encode_in_flight: Arc<AtomicBool>,
    encode_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl ClipRecorder {
    pub fn new(channel: u16, spec: EncodeSpec, encoder: Box<dyn ClipEncoder>) -> Self {
        Self {
            channel,
            spec,
            encoder: Mutex::new(encoder),
            state: Mutex::new(RecorderState::Idle),
            buffer: Arc::new(Mutex::new(Vec::new())),
            delegate: Mutex::new(None),
            encode_in_flight: Arc::new(AtomicBool::new(false)),
            encode_handle: Mutex::new(None),
        }
    }

    pub fn set_delegate(&self, delegate: Arc<dyn RecorderDelegate>) {
        *self.delegate.lock() = Some(delegate);
    }

    pub fn state(&self) -> RecorderState {
        *self.state.lock()
    }

    /// Index of the input channel this recorder observes.
    pub fn channel(&self) -> u16 {
        self.channel
    }

    /// Sink to attach to the recorder's tap. Captures samples only while
    /// in the recording state.
    pub fn tap_sink(self: &Arc<Self>) -> TapSink {
        let recorder = Arc::clone(self);
        Arc::new(move |samples: &[f32]| {
            let state = recorder.state.lock();
            if state.is_recording() {
                recorder.buffer.lock().extend_from_slice(samples);
            }
        })
    }

    /// Begin capturing. Transitions: idle → recording, fires `on_start`.
    pub fn start(&self) -> Result<(), CaptureError> {
        {
            let mut state = self.state.lock();
            if state.is_recording() {
                return Err(CaptureError::InvalidState(
                    "recorder is already recording".into(),
                ));
            }
            if self.encode_in_flight.load(Ordering::SeqCst) {
                return Err(CaptureError::InvalidState(
                    "previous clip is still encoding".into(),
                ));
            }
            self.buffer.lock().clear();
            *state = RecorderState::Recording;
        }

        log::info!("recorder (channel {}) started", self.channel);
        if let Some(delegate) = self.delegate.lock().clone() {
            delegate.on_start();
        }
        Ok(())
    }

    /// Stop capturing. Transitions: recording → idle, fires `on_stop`,
    /// then encodes asynchronously; `on_data_available` follows once the
    /// container is complete.
    pub fn stop(&self) -> Result<(), CaptureError> {
        let samples = {
            let mut state = self.state.lock();
            if !state.is_recording() {
                return Err(CaptureError::InvalidState("recorder is not recording".into()));
            }
            let samples = std::mem::take(&mut *self.buffer.lock());
            *state = RecorderState::Idle;
            samples
        };

        log::info!(
            "recorder (channel {}) stopped: {} samples, peak {:.3}",
            self.channel,
            samples.len(),
            sample_ops::peak_level(&samples)
        );
        if let Some(delegate) = self.delegate.lock().clone() {
            delegate.on_stop();
        }

        self.spawn_encode(samples);
        Ok(())
    }

    /// Block until any in-flight encode worker has finished.
    pub fn wait_idle(&self) {
        if let Some(handle) = self.encode_handle.lock().take() {
            let _ = handle.join();
        }
    }

    /// Stream died. Forces recording → idle without emitting data and
    /// fires `on_stream_error`; a no-op for idle recorders.
    pub(crate) fn handle_stream_error(&self, error: &CaptureError) {
        {
            let mut state = self.state.lock();
            if !state.is_recording() {
                return;
            }
            self.buffer.lock().clear();
            *state = RecorderState::Idle;
        }

        log::warn!(
            "recorder (channel {}) stream error, recording discarded: {}",
            self.channel,
            error
        );
        if let Some(delegate) = self.delegate.lock().clone() {
            delegate.on_stream_error(error);
        }
    }

    fn spawn_encode(&self, samples: Vec<f32>) {
        self.encode_in_flight.store(true, Ordering::SeqCst);

        let encoder = self.encoder.lock().clone();
        let delegate = self.delegate.lock().clone();
        let in_flight = Arc::clone(&self.encode_in_flight);
        let spec = self.spec;
        let channel = self.channel;

        let handle = thread::Builder::new()
            .name(format!("clip-encode-{}", channel))
            .spawn(move || {
                match encode_clip(encoder, spec, &samples) {
                    Ok(clip) => {
                        log::info!(
                            "recorder (channel {}) clip ready: {} bytes, {:.2}s",
                            channel,
                            clip.data.len(),
                            clip.metadata.duration_secs
                        );
                        if let Some(ref delegate) = delegate {
                            delegate.on_data_available(&clip);
                        }
                    }
                    Err(e) => {
                        log::error!("recorder (channel {}) encode failed: {}", channel, e);
                        if let Some(ref delegate) = delegate {
                            delegate.on_error(&e);
                        }
                    }
                }
                in_flight.store(false, Ordering::SeqCst);
            })
            .expect("failed to spawn encode thread");

        *self.encode_handle.lock() = Some(handle);
    }
}

/// One full encode cycle: begin → feed → finish, wrapped into a clip.
fn encode_clip(
    mut encoder: Box<dyn ClipEncoder>,
    spec: EncodeSpec,
    samples: &[f32],
) -> Result<EncodedClip, CaptureError> {
    encoder.begin(spec)?;
    encoder.feed(samples)?;
    let data = encoder.finish()?;

    let duration_secs = samples.len() as f64 / spec.sample_rate as f64;
    Ok(EncodedClip::new(
        data,
        encoder.container(),
        spec.sample_rate,
        spec.channels,
        spec.bit_depth,
        duration_secs,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::wav_encoder::WavClipEncoder;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start,
        Stop,
        Data {
            channels: u16,
            bit_depth: u16,
            data_len: usize,
        },
        StreamError,
        EncodeError,
    }

    struct EventLog {
        events: Mutex<Vec<Event>>,
    }

    impl EventLog {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().clone()
        }
    }

    impl RecorderDelegate for EventLog {
        fn on_start(&self) {
            self.events.lock().push(Event::Start);
        }
        fn on_stop(&self) {
            self.events.lock().push(Event::Stop);
        }
        fn on_data_available(&self, clip: &EncodedClip) {
            self.events.lock().push(Event::Data {
                channels: clip.metadata.channels,
                bit_depth: clip.metadata.bit_depth,
                data_len: clip.data.len(),
            });
        }
        fn on_stream_error(&self, _error: &CaptureError) {
            self.events.lock().push(Event::StreamError);
        }
        fn on_error(&self, _error: &CaptureError) {
            self.events.lock().push(Event::EncodeError);
        }
    }

    fn recorder() -> Arc<ClipRecorder> {
        Arc::new(ClipRecorder::new(
            0,
            EncodeSpec {
                sample_rate: 48000,
                channels: 1,
                bit_depth: 16,
            },
            Box::new(WavClipEncoder::new()),
        ))
    }

    #[test]
    fn start_stop_fires_events_in_order() {
        let recorder = recorder();
        let log = EventLog::new();
        recorder.set_delegate(log.clone());
        let sink = recorder.tap_sink();

        recorder.start().unwrap();
        sink(&[0.25; 4800]); // 100ms at 48kHz
        recorder.stop().unwrap();
        recorder.wait_idle();

        assert_eq!(
            log.events(),
            vec![
                Event::Start,
                Event::Stop,
                Event::Data {
                    channels: 1,
                    bit_depth: 16,
                    data_len: 44 + 4800 * 2,
                }
            ]
        );
        assert!(recorder.state().is_idle());
    }

    #[test]
    fn second_start_while_recording_is_rejected() {
        let recorder = recorder();
        let log = EventLog::new();
        recorder.set_delegate(log.clone());

        recorder.start().unwrap();
        let err = recorder.start().unwrap_err();

        assert!(matches!(err, CaptureError::InvalidState(_)));
        assert_eq!(log.events(), vec![Event::Start]); // no second on_start
        assert!(recorder.state().is_recording());
    }

    #[test]
    fn stop_while_idle_is_rejected() {
        let recorder = recorder();
        assert!(matches!(
            recorder.stop().unwrap_err(),
            CaptureError::InvalidState(_)
        ));
    }

    #[test]
    fn sink_captures_only_while_recording() {
        let recorder = recorder();
        let log = EventLog::new();
        recorder.set_delegate(log.clone());
        let sink = recorder.tap_sink();

        sink(&[1.0; 100]); // before start, dropped
        recorder.start().unwrap();
        sink(&[0.5; 480]);
        recorder.stop().unwrap();
        sink(&[1.0; 100]); // after stop, dropped
        recorder.wait_idle();

        // The pre/post-roll would inflate the data size if the gate leaked.
        let events = log.events();
        assert_eq!(
            events.last(),
            Some(&Event::Data {
                channels: 1,
                bit_depth: 16,
                data_len: 44 + 480 * 2,
            })
        );
    }

    #[test]
    fn stream_error_discards_recording_without_data() {
        let recorder = recorder();
        let log = EventLog::new();
        recorder.set_delegate(log.clone());
        let sink = recorder.tap_sink();

        recorder.start().unwrap();
        sink(&[0.5; 1000]);
        recorder.handle_stream_error(&CaptureError::StreamInterrupted(
            "device unplugged".into(),
        ));
        recorder.wait_idle();

        assert_eq!(log.events(), vec![Event::Start, Event::StreamError]);
        assert!(recorder.state().is_idle());
    }

    #[test]
    fn stream_error_while_idle_is_silent() {
        let recorder = recorder();
        let log = EventLog::new();
        recorder.set_delegate(log.clone());

        recorder.handle_stream_error(&CaptureError::StreamInterrupted("gone".into()));

        assert!(log.events().is_empty());
    }

    #[test]
    fn restart_after_stream_error_records_fresh() {
        let recorder = recorder();
        let log = EventLog::new();
        recorder.set_delegate(log.clone());
        let sink = recorder.tap_sink();

        recorder.start().unwrap();
        sink(&[0.9; 500]);
        recorder.handle_stream_error(&CaptureError::StreamInterrupted("gone".into()));

        recorder.start().unwrap();
        sink(&[0.1; 48]);
        recorder.stop().unwrap();
        recorder.wait_idle();

        let events = log.events();
        assert_eq!(
            events,
            vec![
                Event::Start,
                Event::StreamError,
                Event::Start,
                Event::Stop,
                Event::Data {
                    channels: 1,
                    bit_depth: 16,
                    data_len: 44 + 48 * 2,
                }
            ]
        );
    }

    struct FailingEncoder;

    impl ClipEncoder for FailingEncoder {
        fn begin(&mut self, _spec: EncodeSpec) -> Result<(), CaptureError> {
            Err(CaptureError::EncodingFailed("worker crashed".into()))
        }
        fn feed(&mut self, _samples: &[f32]) -> Result<(), CaptureError> {
            Ok(())
        }
        fn finish(&mut self) -> Result<Vec<u8>, CaptureError> {
            Ok(Vec::new())
        }
        fn container(&self) -> &str {
            "wav"
        }
        fn clone_box(&self) -> Box<dyn ClipEncoder> {
            Box::new(FailingEncoder)
        }
    }

    #[test]
    fn encoder_failure_reports_on_error_not_data() {
        let recorder = Arc::new(ClipRecorder::new(
            0,
            EncodeSpec {
                sample_rate: 48000,
                channels: 1,
                bit_depth: 16,
            },
            Box::new(FailingEncoder),
        ));
        let log = EventLog::new();
        recorder.set_delegate(log.clone());

        recorder.start().unwrap();
        recorder.stop().unwrap();
        recorder.wait_idle();

        assert_eq!(
            log.events(),
            vec![Event::Start, Event::Stop, Event::EncodeError]
        );
    }
}
