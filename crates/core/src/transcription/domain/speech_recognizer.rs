use std::path::Path;

use super::segment::RecognizedTranscript;

/// Domain interface for speech-to-text transcription.
///
/// Implementations hold an already-loaded model and may be called many times.
/// Audio decoding is the implementation's concern.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> Result<RecognizedTranscript, Box<dyn std::error::Error + Send + Sync>>;
}
