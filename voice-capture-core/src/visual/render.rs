use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use super::visualizer::WaveformVisualizer;

/// Frame interval used when the caller has no preference (~60 fps).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Continuously-rescheduled render task.
///
/// One thread ticks every frame interval and invokes `draw` on every
/// known visualizer in list order. There is no frame-skip logic: a draw
/// that overruns the interval simply delays the next tick. The loop never
/// exits on its own; `stop` (or drop) ends it and joins the thread.
#[derive(Debug)]
pub struct RenderLoop {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RenderLoop {
    /// Start rendering `visualizers`. Call once per session, after the
    /// session is ready.
    pub fn start(
        visualizers: Vec<Arc<Mutex<WaveformVisualizer>>>,
        frame_interval: Duration,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        log::info!(
            "render loop started: {} visualizer(s), {:?} frame interval",
            visualizers.len(),
            frame_interval
        );

        let handle = thread::Builder::new()
            .name("waveform-render".into())
            .spawn(move || {
                while flag.load(Ordering::SeqCst) {
                    thread::sleep(frame_interval);
                    for visualizer in &visualizers {
                        visualizer.lock().draw();
                    }
                }
            })
            .expect("failed to spawn render thread");

        Self {
            running,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the loop and join the render thread.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
