use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::word_timestamp::WordTimestamp;

#[derive(Error, Debug)]
pub enum ResultFileError {
    #[error("failed to serialize transcription result: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed transcription result in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Full transcript plus approximate per-word timings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub timestamps: Vec<WordTimestamp>,
}

impl TranscriptionResult {
    pub fn new(text: impl Into<String>, timestamps: Vec<WordTimestamp>) -> Self {
        Self {
            text: text.into(),
            timestamps,
        }
    }

    pub fn word_count(&self) -> usize {
        self.timestamps.len()
    }

    /// JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, ResultFileError> {
        serde_json::to_string_pretty(self).map_err(ResultFileError::Serialize)
    }

    /// Write as UTF-8 JSON, replacing any existing file at `path`.
    ///
    /// Serialization happens before the file is touched, so a serialization
    /// failure leaves an existing file intact.
    pub fn write_json(&self, path: &Path) -> Result<(), ResultFileError> {
        let json = self.to_json_pretty()?;
        let write_err = |source: std::io::Error| ResultFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
        writer.write_all(json.as_bytes()).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self, ResultFileError> {
        let contents = fs::read_to_string(path).map_err(|e| ResultFileError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| ResultFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
