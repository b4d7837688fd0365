pub mod recorder;
pub mod wav_encoder;

pub use recorder::ClipRecorder;
pub use wav_encoder::WavClipEncoder;
