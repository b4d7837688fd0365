use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::tap::SignalTap;
use crate::models::error::CaptureError;
use crate::traits::surface::DrawSurface;

use super::analyser::TimeDomainAnalyser;

/// Live waveform renderer for one signal tap.
///
/// Surface dimensions are sampled once at construction and reused for
/// every frame; the per-frame byte and point buffers are overwritten, not
/// reallocated. `draw` is idempotent: an unchanged signal renders the
/// identical polyline.
pub struct WaveformVisualizer {
    analyser: Arc<Mutex<TimeDomainAnalyser>>,
    surface: Box<dyn DrawSurface>,
    width: f32,
    height: f32,
    samples: Vec<u8>,
    points: Vec<(f32, f32)>,
}

impl WaveformVisualizer {
    /// Bind a visualizer to `tap`, rendering onto `surface`.
    ///
    /// Connects an analyser sink to the tap; samples start flowing into
    /// the analysis window immediately.
    pub fn new(
        analysis_window: usize,
        tap: &SignalTap,
        surface: Box<dyn DrawSurface>,
    ) -> Result<Self, CaptureError> {
        let analyser = Arc::new(Mutex::new(TimeDomainAnalyser::new(analysis_window)?));
        let bin_count = analyser.lock().bin_count();
        log::debug!(
            "visualizer bound to channel {}: {} bins onto {}x{}",
            tap.channel(),
            bin_count,
            surface.width(),
            surface.height()
        );

        let sink_analyser = Arc::clone(&analyser);
        tap.connect(Arc::new(move |samples: &[f32]| {
            sink_analyser.lock().push(samples);
        }));

        let width = surface.width() as f32;
        let height = surface.height() as f32;

        Ok(Self {
            analyser,
            surface,
            width,
            height,
            samples: vec![128; bin_count],
            points: Vec::with_capacity(bin_count + 1),
        })
    }

    /// Samples per rendered frame.
    pub fn bin_count(&self) -> usize {
        self.samples.len()
    }

    /// Render one frame: snapshot the tap's time-domain bytes, clear the
    /// surface, stroke the waveform polyline.
    ///
    /// Sample index `i` maps to `x = i * (width / bin_count)`; a byte
    /// value `v` maps to `y = (v / 128) * height / 2`, so silence (128)
    /// sits on the horizontal midline. The polyline ends with an explicit
    /// segment to `(width, height / 2)`.
    pub fn draw(&mut self) {
        self.analyser.lock().byte_time_domain(&mut self.samples);

        let slice_width = self.width / self.samples.len() as f32;
        self.points.clear();
        let mut x = 0.0;
        for &byte in &self.samples {
            let v = byte as f32 / 128.0;
            let y = v * self.height / 2.0;
            self.points.push((x, y));
            x += slice_width;
        }
        self.points.push((self.width, self.height / 2.0));

        self.surface.clear();
        self.surface.stroke_polyline(&self.points);
    }
}
