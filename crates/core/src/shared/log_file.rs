use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target, WriteStyle};
use thiserror::Error;

use super::constants::DEFAULT_LOG_FILE;

#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global logger is already installed")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Install a global logger that appends to `path`.
///
/// Level defaults to `info`; `RUST_LOG` overrides it.
pub fn init(path: &Path) -> Result<(), LogInitError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogInitError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .try_init()?;
    Ok(())
}

/// Install the logger on [`DEFAULT_LOG_FILE`] in the working directory.
pub fn init_default() -> Result<(), LogInitError> {
    init(Path::new(DEFAULT_LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::generate_timestamps_use_case::GenerateTimestampsUseCase;
    use crate::transcription::domain::segment::RecognizedTranscript;
    use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
    use tempfile::TempDir;

    struct EmptyRecognizer;

    impl SpeechRecognizer for EmptyRecognizer {
        fn transcribe(
            &self,
            _: &Path,
        ) -> Result<RecognizedTranscript, Box<dyn std::error::Error + Send + Sync>> {
            Ok(RecognizedTranscript::default())
        }
    }

    #[test]
    fn test_init_unwritable_path_returns_open_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing_dir").join("app.log");
        let err = init(&path).unwrap_err();
        assert!(matches!(err, LogInitError::Open { .. }));
        assert!(err.to_string().contains("app.log"));
    }

    // Only one test may install the process-wide logger, so it also covers
    // the use case logging its errors before returning them.
    #[test]
    fn test_init_appends_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("app.log");
        std::fs::write(&path, "existing line\n").unwrap();

        init(&path).unwrap();
        log::error!("transcription failed");
        log::logger().flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("existing line\n"));
        assert!(contents.contains("transcription failed"));

        let use_case = GenerateTimestampsUseCase::new(Box::new(EmptyRecognizer));
        let missing = tmp.path().join("missing.wav");
        assert!(use_case.execute(&missing, None).is_err());
        let audio = tmp.path().join("speech.wav");
        std::fs::write(&audio, b"RIFF").unwrap();
        assert!(use_case.execute(&audio, None).is_err());
        log::logger().flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("file not found"), "{contents}");
        assert!(contents.contains("missing.wav"), "{contents}");
        assert!(
            contents.contains("no segments returned from the recognizer"),
            "{contents}"
        );
        assert!(contents.contains("ERROR"), "{contents}");

        assert!(matches!(init(&path), Err(LogInitError::AlreadySet(_))));
    }
}
