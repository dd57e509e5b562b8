//! Caption entries — the normalized transcript timeline.
//!
//! A transcript is an ordered `Vec<CaptionEntry>`, sorted ascending by
//! `(start_secs, end_secs)`. Overlapping entries are legal; downstream
//! stages only rely on the ordering, never on exclusivity.

use serde::{Deserialize, Serialize};

/// A single timed caption from the source transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Start time in seconds.
    pub start_secs: f64,

    /// End time in seconds (>= start_secs).
    pub end_secs: f64,

    /// Caption text with internal newlines collapsed to spaces.
    pub text: String,
}

impl CaptionEntry {
    /// Create a caption entry.
    pub fn new(start_secs: f64, end_secs: f64, text: impl Into<String>) -> Self {
        Self {
            start_secs,
            end_secs,
            text: text.into(),
        }
    }

    /// Duration of this caption in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Sort captions ascending by `(start_secs, end_secs)`.
///
/// The gap detector requires temporal order, so every producer of a
/// transcript must call this before handing the captions on.
pub fn sort_captions(captions: &mut [CaptionEntry]) {
    captions.sort_by(|a, b| {
        a.start_secs
            .total_cmp(&b.start_secs)
            .then(a.end_secs.total_cmp(&b.end_secs))
    });
}

/// Total duration covered by a transcript: the maximum caption end time.
///
/// Returns 0.0 for an empty transcript.
pub fn total_duration_secs(captions: &[CaptionEntry]) -> f64 {
    captions
        .iter()
        .map(|c| c.end_secs)
        .fold(0.0, |acc, end| acc.max(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_roundtrip() {
        let entry = CaptionEntry::new(1.5, 3.25, "hello world");
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: CaptionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }

    #[test]
    fn test_sort_orders_by_start_then_end() {
        let mut captions = vec![
            CaptionEntry::new(5.0, 6.0, "c"),
            CaptionEntry::new(1.0, 4.0, "b"),
            CaptionEntry::new(1.0, 2.0, "a"),
        ];
        sort_captions(&mut captions);
        assert_eq!(captions[0].text, "a");
        assert_eq!(captions[1].text, "b");
        assert_eq!(captions[2].text, "c");
    }

    #[test]
    fn test_total_duration_uses_max_end_not_last() {
        // An overlapping entry can end later than the final caption starts.
        let captions = vec![
            CaptionEntry::new(0.0, 20.0, "long overlap"),
            CaptionEntry::new(5.0, 10.0, "short"),
        ];
        assert_eq!(total_duration_secs(&captions), 20.0);
    }

    #[test]
    fn test_total_duration_empty() {
        assert_eq!(total_duration_secs(&[]), 0.0);
    }
}
