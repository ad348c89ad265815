use serde::{Deserialize, Serialize};

/// A contiguous span of recognized speech, times in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whitespace-separated words, in spoken order.
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Raw output of a speech recognizer for one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizedTranscript {
    /// Full transcript as reported by the recognizer.
    pub text: String,
    pub segments: Vec<Segment>,
}

impl RecognizedTranscript {
    pub fn new(text: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            text: text.into(),
            segments,
        }
    }
}
