use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A finished recording: container bytes plus metadata.
///
/// The data is a complete, directly playable file (WAV for the stock
/// encoder), ready for the upload collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedClip {
    pub data: Vec<u8>,
    pub metadata: ClipMetadata,
}

impl EncodedClip {
    /// Wrap encoder output, stamping identity, timestamps and checksum.
    pub fn new(
        data: Vec<u8>,
        container: &str,
        sample_rate: u32,
        channels: u16,
        bit_depth: u16,
        duration_secs: f64,
    ) -> Self {
        let checksum = sha256_hex(&data);
        let metadata = ClipMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            container: container.to_string(),
            sample_rate,
            channels,
            bit_depth,
            duration_secs,
            checksum,
        };
        Self { data, metadata }
    }
}

/// Metadata stored alongside an encoded clip.
///
/// Serializable for submission to the collection backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub id: String,
    pub created_at: String,
    pub container: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
    pub duration_secs: f64,
    pub checksum: String,
}

/// Counter-based clip file-name generator.
///
/// Names enumerate within the dataset: `prefix1.wav`, `prefix2.wav`, …
#[derive(Debug, Clone)]
pub struct ClipNamer {
    prefix: String,
    file_count: u32,
}

impl ClipNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            file_count: 0,
        }
    }

    /// Next file name in the dataset enumeration.
    pub fn next_name(&mut self) -> String {
        self.file_count += 1;
        format!("{}{}.wav", self.prefix, self.file_count)
    }

    /// Number of names handed out so far.
    pub fn count(&self) -> u32 {
        self.file_count
    }
}

/// SHA-256 hex digest of a byte buffer.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_carries_mono_metadata() {
        let clip = EncodedClip::new(vec![1, 2, 3], "wav", 48000, 1, 16, 0.5);
        assert_eq!(clip.metadata.channels, 1);
        assert_eq!(clip.metadata.bit_depth, 16);
        assert_eq!(clip.metadata.sample_rate, 48000);
        assert_eq!(clip.metadata.container, "wav");
        assert!(!clip.metadata.id.is_empty());
    }

    #[test]
    fn checksum_is_stable_for_identical_data() {
        let a = EncodedClip::new(vec![0xAB; 64], "wav", 48000, 1, 16, 1.0);
        let b = EncodedClip::new(vec![0xAB; 64], "wav", 48000, 1, 16, 1.0);
        assert_eq!(a.metadata.checksum, b.metadata.checksum);
        assert_eq!(a.metadata.checksum.len(), 64); // 32 bytes hex-encoded
    }

    #[test]
    fn checksum_differs_for_different_data() {
        let a = EncodedClip::new(vec![0x00; 8], "wav", 48000, 1, 16, 0.1);
        let b = EncodedClip::new(vec![0x01; 8], "wav", 48000, 1, 16, 0.1);
        assert_ne!(a.metadata.checksum, b.metadata.checksum);
    }

    #[test]
    fn metadata_serializes_to_json() {
        let clip = EncodedClip::new(vec![1, 2, 3], "wav", 44100, 1, 16, 0.25);
        let json = serde_json::to_string(&clip.metadata).unwrap();
        assert!(json.contains("\"sample_rate\":44100"));
        assert!(json.contains("\"checksum\""));
        assert!(json.contains("\"created_at\""));
    }

    #[test]
    fn namer_enumerates_from_one() {
        let mut namer = ClipNamer::new("mydatasetrecording");
        assert_eq!(namer.next_name(), "mydatasetrecording1.wav");
        assert_eq!(namer.next_name(), "mydatasetrecording2.wav");
        assert_eq!(namer.count(), 2);
    }

    #[test]
    fn sha256_hex_known_value() {
        // SHA-256 of the empty input.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
