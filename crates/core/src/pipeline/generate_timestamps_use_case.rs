use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::transcription_result::{ResultFileError, TranscriptionResult};
use crate::transcription::domain::word_timestamp::approximate_word_timestamps;

#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("no segments returned from the recognizer")]
    EmptyResult,
    #[error("transcription failed: {0}")]
    Recognition(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Output(#[from] ResultFileError),
}

impl TimestampError {
    /// True for failures other than a missing input or an empty transcript.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            TimestampError::Recognition(_) | TimestampError::Output(_)
        )
    }
}

/// Transcribes one audio file and approximates a timestamp for every word.
///
/// Owns the recognizer, so the model is loaded once by the caller and reused
/// across `execute` calls.
pub struct GenerateTimestampsUseCase {
    recognizer: Box<dyn SpeechRecognizer>,
}

impl GenerateTimestampsUseCase {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Every error is logged here before being returned, so callers may
    /// discard it without losing the diagnostic.
    pub fn execute(
        &self,
        audio_path: &Path,
        output_json_path: Option<&Path>,
    ) -> Result<TranscriptionResult, TimestampError> {
        self.run(audio_path, output_json_path).map_err(|e| {
            log::error!("Whisper timestamp generation failed: {e}");
            e
        })
    }

    fn run(
        &self,
        audio_path: &Path,
        output_json_path: Option<&Path>,
    ) -> Result<TranscriptionResult, TimestampError> {
        if !audio_path.exists() {
            return Err(TimestampError::FileNotFound {
                path: audio_path.to_path_buf(),
            });
        }

        log::info!("Transcribing audio: {}", audio_path.display());
        let transcript = self
            .recognizer
            .transcribe(audio_path)
            .map_err(TimestampError::Recognition)?;

        if transcript.segments.is_empty() {
            return Err(TimestampError::EmptyResult);
        }

        let timestamps = approximate_word_timestamps(&transcript.segments);
        let result = TranscriptionResult::new(transcript.text, timestamps);
        log::info!(
            "Generated {} word-level timestamps from {} segments",
            result.word_count(),
            transcript.segments.len()
        );

        if let Some(path) = output_json_path {
            result.write_json(path)?;
            log::info!("Saved JSON: {}", path.display());
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::domain::segment::{RecognizedTranscript, Segment};
    use crate::transcription::domain::word_timestamp::WordTimestamp;
    use approx::assert_abs_diff_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    // ─── Stubs ───

    struct StubRecognizer {
        transcript: RecognizedTranscript,
        calls: Arc<AtomicUsize>,
    }

    impl StubRecognizer {
        fn new(segments: Vec<Segment>) -> Self {
            let text = segments.iter().map(|s| s.text.as_str()).collect::<String>();
            Self {
                transcript: RecognizedTranscript::new(text, segments),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl SpeechRecognizer for StubRecognizer {
        fn transcribe(
            &self,
            _: &Path,
        ) -> Result<RecognizedTranscript, Box<dyn std::error::Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.transcript.clone())
        }
    }

    struct FailingRecognizer;

    impl SpeechRecognizer for FailingRecognizer {
        fn transcribe(
            &self,
            _: &Path,
        ) -> Result<RecognizedTranscript, Box<dyn std::error::Error + Send + Sync>> {
            Err("model exploded".into())
        }
    }

    fn audio_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("speech.wav");
        std::fs::write(&path, b"RIFF").unwrap();
        path
    }

    fn word(word: &str, start: f64, end: f64) -> WordTimestamp {
        WordTimestamp {
            word: word.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_missing_file_skips_recognizer() {
        let stub = StubRecognizer::new(vec![Segment::new("hello", 0.0, 1.0)]);
        let calls = stub.calls.clone();
        let uc = GenerateTimestampsUseCase::new(Box::new(stub));

        let err = uc
            .execute(Path::new("/nonexistent/speech.wav"), None)
            .unwrap_err();

        assert!(matches!(err, TimestampError::FileNotFound { .. }));
        assert!(!err.is_failure());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_segments_is_empty_result() {
        let tmp = TempDir::new().unwrap();
        let uc = GenerateTimestampsUseCase::new(Box::new(StubRecognizer::new(Vec::new())));

        let err = uc.execute(&audio_file(&tmp), None).unwrap_err();
        assert!(matches!(err, TimestampError::EmptyResult));
        assert!(!err.is_failure());
    }

    #[test]
    fn test_only_blank_segments_gives_empty_timestamps() {
        let tmp = TempDir::new().unwrap();
        let uc = GenerateTimestampsUseCase::new(Box::new(StubRecognizer::new(vec![Segment::new(
            " ", 0.0, 1.0,
        )])));

        let result = uc.execute(&audio_file(&tmp), None).unwrap();
        assert!(result.timestamps.is_empty());
    }

    #[test]
    fn test_recognizer_error_is_failure() {
        let tmp = TempDir::new().unwrap();
        let uc = GenerateTimestampsUseCase::new(Box::new(FailingRecognizer));

        let err = uc.execute(&audio_file(&tmp), None).unwrap_err();
        assert!(matches!(err, TimestampError::Recognition(_)));
        assert!(err.is_failure());
        assert!(err.to_string().contains("model exploded"));
    }

    #[test]
    fn test_words_timed_across_segments() {
        let tmp = TempDir::new().unwrap();
        let stub = StubRecognizer::new(vec![
            Segment::new(" hello world", 0.0, 2.0),
            Segment::new("", 2.0, 2.5),
            Segment::new(" a", 2.5, 3.0),
        ]);
        let calls = stub.calls.clone();
        let uc = GenerateTimestampsUseCase::new(Box::new(stub));

        let result = uc.execute(&audio_file(&tmp), None).unwrap();

        assert_eq!(result.text, " hello world a");
        assert_eq!(
            result.timestamps,
            vec![
                word("hello", 0.0, 1.0),
                word("world", 1.0, 2.0),
                word("a", 2.5, 3.0),
            ]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_segment_span_is_covered() {
        let tmp = TempDir::new().unwrap();
        let uc = GenerateTimestampsUseCase::new(Box::new(StubRecognizer::new(vec![
            Segment::new("the quick brown fox jumps over the lazy dog", 1.37, 4.91),
        ])));

        let result = uc.execute(&audio_file(&tmp), None).unwrap();
        let words = &result.timestamps;
        assert_eq!(words.len(), 9);
        assert_abs_diff_eq!(words[0].start, 1.37, epsilon = 0.01);
        assert_abs_diff_eq!(words[8].end, 4.91, epsilon = 0.01);
    }

    #[test]
    fn test_output_file_matches_returned_result() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("result.json");
        std::fs::write(&out, "stale").unwrap();
        let uc = GenerateTimestampsUseCase::new(Box::new(StubRecognizer::new(vec![
            Segment::new("hello world", 0.0, 2.0),
        ])));

        let result = uc.execute(&audio_file(&tmp), Some(&out)).unwrap();

        assert_eq!(TranscriptionResult::read_json(&out).unwrap(), result);
    }

    #[test]
    fn test_unwritable_output_returns_no_result() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("missing_dir").join("result.json");
        let uc = GenerateTimestampsUseCase::new(Box::new(StubRecognizer::new(vec![
            Segment::new("hello", 0.0, 1.0),
        ])));

        let err = uc.execute(&audio_file(&tmp), Some(&out)).unwrap_err();
        assert!(matches!(err, TimestampError::Output(_)));
        assert!(err.is_failure());
    }

    #[test]
    fn test_model_reused_across_calls() {
        let tmp = TempDir::new().unwrap();
        let stub = StubRecognizer::new(vec![Segment::new("again", 0.0, 1.0)]);
        let calls = stub.calls.clone();
        let uc = GenerateTimestampsUseCase::new(Box::new(stub));
        let audio = audio_file(&tmp);

        for _ in 0..3 {
            uc.execute(&audio, None).unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
