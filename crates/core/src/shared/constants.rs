use super::model_size::ModelSize;

pub const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Quality tier loaded when the caller does not pick one.
pub const DEFAULT_MODEL_SIZE: ModelSize = ModelSize::Base;

pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Whisper caps useful decoder parallelism well below typical core counts.
pub const MAX_WHISPER_THREADS: usize = 4;

pub const TIMESTAMP_DECIMALS: i32 = 2;

pub const DEFAULT_LOG_FILE: &str = "whisper_integration.log";
