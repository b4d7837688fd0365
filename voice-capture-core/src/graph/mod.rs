pub mod splitter;
pub mod tap;

pub use splitter::SignalGraph;
pub use tap::{SignalTap, TapSink};
