use crate::models::config::{MAX_ANALYSIS_WINDOW, MIN_ANALYSIS_WINDOW};
use crate::models::error::CaptureError;
use crate::processing::sample_ops;
use crate::processing::sample_window::SampleWindow;

/// Time-domain analyser over one signal tap.
///
/// Keeps a circular window of the last `window_size` samples and exposes a
/// non-consuming byte snapshot (128 = zero crossing). One visual frame
/// reads `bin_count` = `window_size / 2` bytes, so the snapshot covers the
/// newest half of the window.
pub struct TimeDomainAnalyser {
    window: SampleWindow,
    window_size: usize,
    scratch: Vec<f32>,
}

impl TimeDomainAnalyser {
    /// `window_size` must be a power of two in
    /// `[MIN_ANALYSIS_WINDOW, MAX_ANALYSIS_WINDOW]`.
    pub fn new(window_size: usize) -> Result<Self, CaptureError> {
        if !window_size.is_power_of_two()
            || !(MIN_ANALYSIS_WINDOW..=MAX_ANALYSIS_WINDOW).contains(&window_size)
        {
            return Err(CaptureError::ConfigurationFailed(format!(
                "invalid analysis window: {}",
                window_size
            )));
        }

        Ok(Self {
            window: SampleWindow::new(window_size),
            window_size,
            scratch: vec![0.0; window_size / 2],
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Samples per time-domain snapshot: half the analysis window.
    pub fn bin_count(&self) -> usize {
        self.window_size / 2
    }

    /// Feed tap samples into the window. Called from the audio thread.
    pub fn push(&mut self, samples: &[f32]) {
        self.window.push(samples);
    }

    /// Point-in-time read of the newest `out.len()` samples as unsigned
    /// bytes. A silent (or never-written) window reads as all 128.
    pub fn byte_time_domain(&mut self, out: &mut [u8]) {
        self.scratch.resize(out.len(), 0.0);
        self.window.snapshot_into(&mut self.scratch);
        sample_ops::byte_time_domain(&self.scratch, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_window() {
        assert!(TimeDomainAnalyser::new(1000).is_err());
        assert!(TimeDomainAnalyser::new(0).is_err());
    }

    #[test]
    fn rejects_out_of_range_window() {
        assert!(TimeDomainAnalyser::new(16).is_err());
        assert!(TimeDomainAnalyser::new(65536).is_err());
    }

    #[test]
    fn bin_count_is_half_the_window() {
        let analyser = TimeDomainAnalyser::new(2048).unwrap();
        assert_eq!(analyser.bin_count(), 1024);
    }

    #[test]
    fn silent_window_snapshots_as_128() {
        let mut analyser = TimeDomainAnalyser::new(64).unwrap();
        let mut out = [0u8; 32];
        analyser.byte_time_domain(&mut out);
        assert_eq!(out, [128u8; 32]);
    }

    #[test]
    fn snapshot_reflects_newest_samples() {
        let mut analyser = TimeDomainAnalyser::new(64).unwrap();
        analyser.push(&[0.0; 64]);
        analyser.push(&[1.0; 32]);

        let mut out = [0u8; 32];
        analyser.byte_time_domain(&mut out);
        assert_eq!(out, [255u8; 32]);
    }

    #[test]
    fn snapshot_is_non_consuming() {
        let mut analyser = TimeDomainAnalyser::new(64).unwrap();
        analyser.push(&[0.5; 64]);

        let mut first = [0u8; 32];
        let mut second = [0u8; 32];
        analyser.byte_time_domain(&mut first);
        analyser.byte_time_domain(&mut second);
        assert_eq!(first, second);
    }
}
