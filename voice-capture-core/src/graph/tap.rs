use std::sync::Arc;

use parking_lot::Mutex;

/// Sink attached to a tap. Receives the tap's mono samples on the audio
/// thread; copy out whatever must outlive the call.
pub type TapSink = Arc<dyn Fn(&[f32]) + Send + Sync + 'static>;

/// A single-channel signal branch split off the raw stream.
///
/// Taps are unit-gain: samples pass through unscaled. Each sink gets its
/// own read of the buffer, so consumption downstream of one tap never
/// affects another tap's signal.
pub struct SignalTap {
    channel: u16,
    sinks: Mutex<Vec<TapSink>>,
}

impl SignalTap {
    pub(crate) fn new(channel: u16) -> Self {
        Self {
            channel,
            sinks: Mutex::new(Vec::new()),
        }
    }

    /// Index of the input channel this tap observes.
    pub fn channel(&self) -> u16 {
        self.channel
    }

    /// Attach a sink. Sinks fire in attachment order on every buffer.
    pub fn connect(&self, sink: TapSink) {
        self.sinks.lock().push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    /// Fan one mono buffer out to every attached sink.
    pub(crate) fn push(&self, samples: &[f32]) {
        // Clone the Arc list so sinks run without the registry lock held.
        let sinks: Vec<TapSink> = self.sinks.lock().clone();
        for sink in &sinks {
            sink(samples);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_reaches_sinks_in_attachment_order() {
        let tap = SignalTap::new(0);
        let seen: Arc<Mutex<Vec<(u8, usize)>>> = Arc::new(Mutex::new(Vec::new()));

        for tag in [1u8, 2] {
            let log = Arc::clone(&seen);
            tap.connect(Arc::new(move |samples: &[f32]| {
                log.lock().push((tag, samples.len()));
            }));
        }

        tap.push(&[0.1, 0.2, 0.3]);

        assert_eq!(seen.lock().as_slice(), &[(1, 3), (2, 3)]);
        assert_eq!(tap.sink_count(), 2);
    }

    #[test]
    fn samples_pass_through_unscaled() {
        let tap = SignalTap::new(1);
        let captured: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&captured);
        tap.connect(Arc::new(move |samples: &[f32]| {
            log.lock().extend_from_slice(samples);
        }));

        tap.push(&[0.5, -0.25]);

        assert_eq!(captured.lock().as_slice(), &[0.5, -0.25]);
    }

    #[test]
    fn push_without_sinks_is_noop() {
        let tap = SignalTap::new(0);
        tap.push(&[1.0; 64]);
        assert_eq!(tap.sink_count(), 0);
    }
}
