use std::path::{Path, PathBuf};

use thiserror::Error;
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperError,
};

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use crate::shared::constants::{MAX_WHISPER_THREADS, WHISPER_SAMPLE_RATE};
use crate::shared::device::Device;
use crate::shared::model_resolver::{self, ModelResolveError, ProgressFn};
use crate::shared::model_size::ModelSize;
use crate::transcription::domain::segment::{RecognizedTranscript, Segment};
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;

#[derive(Error, Debug)]
pub enum WhisperLoadError {
    #[error("Whisper model not found at: {0}")]
    ModelNotFound(PathBuf),
    #[error("model path is not valid UTF-8: {0}")]
    InvalidModelPath(PathBuf),
    #[error("failed to load Whisper model: {0}")]
    Load(#[source] WhisperError),
    #[error(transparent)]
    Resolve(#[from] ModelResolveError),
}

/// Settings fixed when the model is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct WhisperConfig {
    pub model_path: PathBuf,
    pub device: Device,
    /// ISO 639-1 code, or `None` to let Whisper detect the language.
    pub language: Option<String>,
    pub n_threads: usize,
}

impl WhisperConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            device: Device::preferred(),
            language: None,
            n_threads: num_cpus().min(MAX_WHISPER_THREADS),
        }
    }
}

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// The model is loaded once in [`WhisperRecognizer::new`] and shared by every
/// call to `transcribe`; each call gets its own decoding state.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
    config: WhisperConfig,
    reader: Box<dyn AudioReader>,
}

impl WhisperRecognizer {
    pub fn new(
        config: WhisperConfig,
        reader: Box<dyn AudioReader>,
    ) -> Result<Self, WhisperLoadError> {
        if !config.model_path.exists() {
            return Err(WhisperLoadError::ModelNotFound(config.model_path));
        }
        let model_path = config
            .model_path
            .to_str()
            .ok_or_else(|| WhisperLoadError::InvalidModelPath(config.model_path.clone()))?;

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(config.device.use_gpu());

        log::info!(
            "Loading Whisper model {} on {:?}",
            config.model_path.display(),
            config.device
        );
        let ctx =
            WhisperContext::new_with_params(model_path, ctx_params).map_err(WhisperLoadError::Load)?;

        Ok(Self {
            ctx,
            config,
            reader,
        })
    }

    /// Resolve (downloading if needed) the weights for `size` and load them
    /// with default settings and ffmpeg decoding.
    pub fn from_model_size(
        size: ModelSize,
        progress: Option<ProgressFn>,
    ) -> Result<Self, WhisperLoadError> {
        let model_path = model_resolver::resolve_model(size, progress)?;
        Self::new(WhisperConfig::new(model_path), Box::new(FfmpegAudioReader))
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> Result<RecognizedTranscript, Box<dyn std::error::Error + Send + Sync>> {
        let audio = match self.reader.read_audio(audio_path, WHISPER_SAMPLE_RATE)? {
            Some(a) if !a.is_empty() => a,
            _ => {
                log::warn!("No decodable audio in {}", audio_path.display());
                return Ok(RecognizedTranscript::default());
            }
        };

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(self.config.language.as_deref().unwrap_or("auto")));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(self.config.n_threads.max(1) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut text = String::new();
        let mut segments = Vec::new();

        for seg_idx in 0..state.full_n_segments() {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };
            let seg_text = segment
                .to_str_lossy()
                .map_err(|e| format!("Failed to read segment {seg_idx} text: {e}"))?;

            // Segment timestamps are in centiseconds (10ms units)
            let start = segment.start_timestamp() as f64 / 100.0;
            let end = segment.end_timestamp() as f64 / 100.0;

            text.push_str(&seg_text);
            segments.push(Segment::new(seg_text.into_owned(), start, end));
        }

        log::debug!(
            "Whisper produced {} segments for {:.1}s of audio",
            segments.len(),
            audio.duration()
        );

        Ok(RecognizedTranscript::new(text, segments))
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
