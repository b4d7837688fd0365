/// Fixed-size circular window over the most recent audio samples.
///
/// Unlike a FIFO, reading does not consume: `snapshot_into` copies the
/// newest samples in arrival order and leaves the window untouched. Wrap
/// in `Arc<parking_lot::Mutex<_>>` for cross-thread access.
///
/// Overflow behavior: the oldest samples are overwritten.
#[derive(Debug)]
pub struct SampleWindow {
    buffer: Vec<f32>,
    write_index: usize,
    filled: usize,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            write_index: 0,
            filled: 0,
            capacity,
        }
    }

    /// Append samples, overwriting the oldest on overflow.
    ///
    /// If `samples` is larger than capacity, only the last `capacity`
    /// samples are kept.
    pub fn push(&mut self, samples: &[f32]) {
        if samples.is_empty() || self.capacity == 0 {
            return;
        }

        let samples = if samples.len() > self.capacity {
            &samples[samples.len() - self.capacity..]
        } else {
            samples
        };

        for &sample in samples {
            self.buffer[self.write_index] = sample;
            self.write_index = (self.write_index + 1) % self.capacity;
        }
        self.filled = (self.filled + samples.len()).min(self.capacity);
    }

    /// Copy the most recent `out.len()` samples into `out`, oldest first.
    ///
    /// Positions never written read as silence (0.0), so a fresh window
    /// snapshots as leading silence. `out` may be any length up to the
    /// window capacity; longer requests are truncated to capacity.
    pub fn snapshot_into(&self, out: &mut [f32]) {
        if self.capacity == 0 {
            out.fill(0.0);
            return;
        }

        let n = out.len().min(self.capacity);
        let start = (self.write_index + self.capacity - n) % self.capacity;
        for (i, slot) in out[..n].iter_mut().enumerate() {
            *slot = self.buffer[(start + i) % self.capacity];
        }
        out[n..].fill(0.0);
    }

    /// Number of samples written so far, saturating at capacity.
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(window: &SampleWindow, n: usize) -> Vec<f32> {
        let mut out = vec![f32::NAN; n];
        window.snapshot_into(&mut out);
        out
    }

    #[test]
    fn fresh_window_reads_as_silence() {
        let window = SampleWindow::new(4);
        assert!(window.is_empty());
        assert_eq!(snapshot(&window, 4), vec![0.0; 4]);
    }

    #[test]
    fn partial_fill_pads_with_leading_silence() {
        let mut window = SampleWindow::new(4);
        window.push(&[1.0, 2.0]);

        assert_eq!(window.len(), 2);
        assert_eq!(snapshot(&window, 4), vec![0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn overflow_overwrites_oldest() {
        let mut window = SampleWindow::new(4);
        window.push(&[1.0, 2.0, 3.0, 4.0]);
        window.push(&[5.0, 6.0]);

        assert_eq!(snapshot(&window, 4), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn push_larger_than_capacity_keeps_tail() {
        let mut window = SampleWindow::new(3);
        window.push(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(snapshot(&window, 3), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn snapshot_shorter_than_capacity_takes_newest() {
        let mut window = SampleWindow::new(8);
        window.push(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(snapshot(&window, 3), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn snapshot_longer_than_capacity_zero_fills_tail() {
        let mut window = SampleWindow::new(2);
        window.push(&[1.0, 2.0]);

        assert_eq!(snapshot(&window, 4), vec![1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn snapshot_does_not_consume() {
        let mut window = SampleWindow::new(4);
        window.push(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(snapshot(&window, 4), snapshot(&window, 4));
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn wraparound_preserves_order() {
        let mut window = SampleWindow::new(4);
        window.push(&[1.0, 2.0, 3.0]);
        window.push(&[4.0, 5.0, 6.0]);

        assert_eq!(snapshot(&window, 4), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn empty_push_is_noop() {
        let mut window = SampleWindow::new(4);
        window.push(&[]);
        assert!(window.is_empty());
    }
}
