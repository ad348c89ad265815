use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::shared::constants::TIMESTAMP_DECIMALS;

/// Estimated timing of one word, derived from its segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Round to two decimals on the exact binary value, ties to even.
///
/// Scaling by 100 first would round the product and invent halfway cases
/// (0.015 * 100 == 1.5), so this goes through the correctly rounded formatter.
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.*}", TIMESTAMP_DECIMALS as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Divide a segment's span evenly across its words.
///
/// Each word start is derived from its index rather than the previous
/// word's rounded end, so rounding error never accumulates across a segment.
pub fn split_segment(segment: &Segment) -> Vec<WordTimestamp> {
    if segment.is_blank() {
        return Vec::new();
    }
    let words = segment.words();

    let step = segment.duration() / words.len().max(1) as f64;

    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            let start = segment.start + i as f64 * step;
            WordTimestamp {
                word: word.to_string(),
                start: round_to_hundredths(start),
                end: round_to_hundredths(start + step),
            }
        })
        .collect()
}

/// Flatten per-segment word timings, keeping segment and word order.
pub fn approximate_word_timestamps(segments: &[Segment]) -> Vec<WordTimestamp> {
    segments.iter().flat_map(split_segment).collect()
}
