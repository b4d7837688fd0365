use std::sync::Arc;

use parking_lot::Mutex;

use super::tap::SignalTap;

/// Channel-splitting graph: one splitter fed by the raw stream, one
/// unit-gain mono tap per configured input channel.
///
/// `ingest` runs on the audio thread; per-tap lane buffers are reused
/// across buffers, not reallocated.
pub struct SignalGraph {
    taps: Vec<Arc<SignalTap>>,
    stream_channels: u16,
    lanes: Mutex<Vec<Vec<f32>>>,
}

impl SignalGraph {
    /// Build one tap per requested channel actually present in the stream.
    ///
    /// If `requested` exceeds `stream_channels`, only the channels present
    /// are populated; requesting a sane count is the caller's job.
    pub fn build(stream_channels: u16, requested: u16) -> Self {
        let tap_count = requested.min(stream_channels);
        let taps = (0..tap_count)
            .map(|channel| Arc::new(SignalTap::new(channel)))
            .collect::<Vec<_>>();
        let lanes = Mutex::new(vec![Vec::new(); taps.len()]);

        Self {
            taps,
            stream_channels,
            lanes,
        }
    }

    pub fn taps(&self) -> &[Arc<SignalTap>] {
        &self.taps
    }

    pub fn tap_count(&self) -> usize {
        self.taps.len()
    }

    /// Deinterleave one hardware buffer into the taps.
    ///
    /// `samples` is interleaved with the stream's channel count; a partial
    /// trailing frame is dropped.
    pub fn ingest(&self, samples: &[f32]) {
        let stride = self.stream_channels as usize;
        if stride == 0 || self.taps.is_empty() {
            return;
        }
        let frames = samples.len() / stride;

        let mut lanes = self.lanes.lock();
        for (i, tap) in self.taps.iter().enumerate() {
            let channel = tap.channel() as usize;
            let lane = &mut lanes[i];
            lane.clear();
            lane.extend((0..frames).map(|frame| samples[frame * stride + channel]));
        }
        for (i, tap) in self.taps.iter().enumerate() {
            tap.push(&lanes[i]);
        }
    }
}
