use crate::models::clip::EncodedClip;
use crate::models::error::CaptureError;

/// Upload collaborator: ships a finished clip to the collection backend.
///
/// The transport is not this crate's concern: implementations wrap
/// whatever the deployment uses (an HTTP form post in the reference
/// deployment). Returns the server's response text on success.
pub trait ClipUploader: Send + Sync {
    fn upload(&self, clip: &EncodedClip, file_name: &str) -> Result<String, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clip::ClipNamer;
    use parking_lot::Mutex;

    /// Collects uploads instead of shipping them.
    struct CollectingUploader {
        received: Mutex<Vec<(String, usize)>>,
    }

    impl ClipUploader for CollectingUploader {
        fn upload(&self, clip: &EncodedClip, file_name: &str) -> Result<String, CaptureError> {
            self.received
                .lock()
                .push((file_name.to_string(), clip.data.len()));
            Ok("Success".to_string())
        }
    }

    #[test]
    fn uploads_named_clips() {
        let uploader = CollectingUploader {
            received: Mutex::new(Vec::new()),
        };
        let mut namer = ClipNamer::new("take");

        let clip = EncodedClip::new(vec![0u8; 44], "wav", 48000, 1, 16, 0.0);
        let response = uploader.upload(&clip, &namer.next_name()).unwrap();

        assert_eq!(response, "Success");
        let received = uploader.received.lock();
        assert_eq!(received.as_slice(), &[("take1.wav".to_string(), 44)]);
    }
}
