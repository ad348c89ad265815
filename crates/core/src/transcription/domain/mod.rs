pub mod segment;
pub mod speech_recognizer;
pub mod transcription_result;
pub mod word_timestamp;
