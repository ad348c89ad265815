use std::path::Path;

use super::audio_segment::AudioSegment;

/// Domain interface for decoding an audio (or video) file to PCM.
pub trait AudioReader: Send {
    /// Decode the best audio stream to mono PCM at the given sample rate.
    /// Returns None if the file has no audio stream.
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error + Send + Sync>>;
}
