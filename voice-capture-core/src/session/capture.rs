use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::{SignalGraph, SignalTap};
use crate::models::config::{SessionConfig, VisualizerSpec};
use crate::models::error::CaptureError;
use crate::models::state::SessionState;
use crate::record::recorder::ClipRecorder;
use crate::record::wav_encoder::WavClipEncoder;
use crate::traits::encoder::{ClipEncoder, EncodeSpec};
use crate::traits::media::{MediaDevices, MediaStream, SampleCallback, StreamErrorCallback};
use crate::visual::render::{RenderLoop, DEFAULT_FRAME_INTERVAL};
use crate::visual::visualizer::WaveformVisualizer;

/// Orchestrates the capture pipeline for one microphone grant.
///
/// Generic over the platform's permission collaborator via `MediaDevices`.
/// On a granted request the session builds the channel-splitting graph,
/// constructs one recorder and one visualizer per tap (index-aligned with
/// the tap list), and starts stream delivery. Dropping the session stops
/// the stream and joins any in-flight encode.
///
/// Data flow once ready:
/// ```text
/// [MediaStream] → [SignalGraph] ─ tap 0 ─┬→ [ClipRecorder 0] → clips
///                                        └→ [WaveformVisualizer 0] → surface
///                                 tap 1 ─┬→ [ClipRecorder 1] → clips
///                                        └→ [WaveformVisualizer 1] → surface
/// ```
pub struct CaptureSession<D: MediaDevices> {
    devices: D,
    config: SessionConfig,
    state: Mutex<SessionState>,
    graph: Option<Arc<SignalGraph>>,
    stream: Option<Box<dyn MediaStream>>,
    recorders: Arc<Mutex<Vec<Arc<ClipRecorder>>>>,
    visualizers: Vec<Arc<Mutex<WaveformVisualizer>>>,
}

// `MediaStream` is not `Debug`, so the struct can't derive it; this minimal
// impl exists only so `Result<CaptureSession<_>, _>::unwrap_err` is usable.
impl<D: MediaDevices> std::fmt::Debug for CaptureSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("has_stream", &self.stream.is_some())
            .finish_non_exhaustive()
    }
}

impl<D: MediaDevices> CaptureSession<D> {
    pub fn new(devices: D, config: SessionConfig) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(Self {
            devices,
            config,
            state: Mutex::new(SessionState::Uninitialized),
            graph: None,
            stream: None,
            recorders: Arc::new(Mutex::new(Vec::new())),
            visualizers: Vec::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Signal taps owned by this session after a successful grant.
    pub fn taps(&self) -> &[Arc<SignalTap>] {
        self.graph.as_ref().map(|graph| graph.taps()).unwrap_or(&[])
    }

    /// Recorders handed out after a successful grant, index-aligned with
    /// the tap list.
    pub fn recorders(&self) -> Vec<Arc<ClipRecorder>> {
        self.recorders.lock().clone()
    }

    /// Visualizers handed out after a successful grant, index-aligned with
    /// the tap list.
    pub fn visualizers(&self) -> &[Arc<Mutex<WaveformVisualizer>>] {
        &self.visualizers
    }

    /// Request microphone access and assemble the pipeline.
    ///
    /// Transitions: uninitialized → requesting-permission → ready on
    /// grant, or → denied on rejection. A denied session may request
    /// again; a ready session may not.
    pub fn request_access(&mut self) -> Result<(), CaptureError> {
        {
            let state = self.state.lock();
            if !state.can_request() {
                return Err(CaptureError::InvalidState(format!(
                    "cannot request access from {:?}",
                    *state
                )));
            }
        }

        if !self.devices.is_supported() {
            *self.state.lock() = SessionState::Denied;
            log::error!("audio capture is not supported on this platform");
            return Err(CaptureError::UnsupportedPlatform);
        }

        *self.state.lock() = SessionState::RequestingPermission;
        log::info!("requesting microphone access");

        let mut stream = match self.devices.request_microphone(&self.config.constraints) {
            Ok(stream) => stream,
            Err(e) => {
                *self.state.lock() = SessionState::Denied;
                log::warn!("microphone access denied: {}", e);
                return Err(e);
            }
        };

        let graph = Arc::new(SignalGraph::build(
            stream.channels(),
            self.config.channel_count,
        ));

        // Wire delivery before starting: samples fan into the graph,
        // stream death fans out to whichever recorders are live by then.
        let ingest_graph = Arc::clone(&graph);
        let on_samples: SampleCallback =
            Arc::new(move |samples: &[f32]| ingest_graph.ingest(samples));

        let error_recorders = Arc::clone(&self.recorders);
        let on_error: StreamErrorCallback = Arc::new(move |error: &CaptureError| {
            log::error!("media stream error: {}", error);
            for recorder in error_recorders.lock().iter() {
                recorder.handle_stream_error(error);
            }
        });

        if let Err(e) = stream.start(on_samples, on_error) {
            *self.state.lock() = SessionState::Denied;
            log::warn!("failed to start stream delivery: {}", e);
            return Err(e);
        }

        let spec = EncodeSpec {
            sample_rate: stream.sample_rate(),
            channels: 1,
            bit_depth: self.config.bit_depth,
        };

        if let Err(e) = self.build_pipeline(&graph, spec) {
            stream.stop();
            *self.state.lock() = SessionState::Denied;
            return Err(e);
        }

        self.graph = Some(graph);
        self.stream = Some(stream);
        *self.state.lock() = SessionState::Ready;
        log::info!(
            "capture session ready: {} tap(s) at {} Hz",
            self.recorders.lock().len(),
            spec.sample_rate
        );
        Ok(())
    }

    /// Start the render loop over this session's visualizers at the
    /// default frame interval.
    pub fn start_render_loop(&self) -> Result<RenderLoop, CaptureError> {
        if !self.state.lock().is_ready() {
            return Err(CaptureError::InvalidState(
                "render loop requires a ready session".into(),
            ));
        }
        Ok(RenderLoop::start(
            self.visualizers.clone(),
            DEFAULT_FRAME_INTERVAL,
        ))
    }

    /// Construct one recorder and one visualizer per tap, consuming the
    /// positional visualizer specs.
    fn build_pipeline(
        &mut self,
        graph: &Arc<SignalGraph>,
        spec: EncodeSpec,
    ) -> Result<(), CaptureError> {
        let tap_count = graph.tap_count();
        let visualizer_specs: Vec<VisualizerSpec> =
            self.config.visualizers.drain(..tap_count).collect();

        let mut recorders = Vec::with_capacity(tap_count);
        let mut visualizers = Vec::with_capacity(tap_count);
        for (tap, vis_spec) in graph.taps().iter().zip(visualizer_specs) {
            let recorder = Arc::new(ClipRecorder::new(
                tap.channel(),
                spec,
                self.clone_encoder_prototype(),
            ));
            tap.connect(recorder.tap_sink());
            recorders.push(recorder);

            let visualizer =
                WaveformVisualizer::new(vis_spec.analysis_window, tap, vis_spec.surface)?;
            visualizers.push(Arc::new(Mutex::new(visualizer)));
        }

        *self.recorders.lock() = recorders;
        self.visualizers = visualizers;
        Ok(())
    }

    fn clone_encoder_prototype(&self) -> Box<dyn ClipEncoder> {
        match &self.config.encoder {
            Some(encoder) => encoder.clone_box(),
            None => Box::new(WavClipEncoder::new()),
        }
    }
}

impl<D: MediaDevices> Drop for CaptureSession<D> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            stream.stop();
        }
        for recorder in self.recorders.lock().iter() {
            recorder.wait_idle();
        }
    }
}
