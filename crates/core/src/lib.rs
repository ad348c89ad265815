//! Whisper transcription with approximate word-level timestamps.
//!
//! Whisper reports timing per segment. [`GenerateTimestampsUseCase`] spreads
//! each segment's span evenly over its words and returns the flattened list,
//! optionally saving it as JSON.
//!
//! ```no_run
//! use std::path::Path;
//! use wordstamp_core::pipeline::generate_timestamps_use_case::GenerateTimestampsUseCase;
//! use wordstamp_core::shared::constants::DEFAULT_MODEL_SIZE;
//! use wordstamp_core::transcription::infrastructure::whisper_recognizer::WhisperRecognizer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! wordstamp_core::shared::log_file::init_default()?;
//! let recognizer = WhisperRecognizer::from_model_size(DEFAULT_MODEL_SIZE, None)?;
//! let use_case = GenerateTimestampsUseCase::new(Box::new(recognizer));
//! let result = use_case.execute(Path::new("talk.mp3"), Some(Path::new("talk.json")))?;
//! println!("{} words", result.word_count());
//! # Ok(())
//! # }
//! ```
//!
//! [`GenerateTimestampsUseCase`]: pipeline::generate_timestamps_use_case::GenerateTimestampsUseCase

pub mod audio;
pub mod pipeline;
pub mod shared;
pub mod transcription;
