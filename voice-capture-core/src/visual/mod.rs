pub mod analyser;
pub mod render;
pub mod visualizer;

pub use analyser::TimeDomainAnalyser;
pub use render::{RenderLoop, DEFAULT_FRAME_INTERVAL};
pub use visualizer::WaveformVisualizer;
