//! The cut plan: final keep segments plus the serialized audit trail.
//!
//! The plan file is the complete, replayable record of a run. Given the
//! same transcript and the same judge responses it must serialize
//! byte-for-byte identically, so it carries no wall-clock fields and all
//! durations are rounded to fixed 3-decimal precision.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::candidate::JudgedCandidate;

/// A half-open interval of the source video to keep, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepSegment {
    /// Segment start in seconds.
    pub start_secs: f64,

    /// Segment end in seconds (> start_secs after normalization).
    pub end_secs: f64,
}

impl KeepSegment {
    /// Create a keep segment.
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// Segment length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// A keep segment as serialized into the plan, rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSegment {
    pub start_secs: f64,
    pub end_secs: f64,
    pub duration_secs: f64,
}

/// Serialized audit record of one StillCut run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutPlan {
    /// Source video path.
    pub video: PathBuf,

    /// Source transcript path.
    pub transcript: PathBuf,

    /// Minimum silence considered for adjudication (seconds).
    pub min_gap_secs: f64,

    /// Context captions sent to the judge per side.
    pub context_size: usize,

    /// Duration of the source, from the transcript (3 decimals).
    pub total_duration_secs: f64,

    /// Sum of keep-segment lengths (3 decimals).
    pub estimated_duration_secs: f64,

    /// Every adjudicated gap, with its decision and reason.
    pub candidates: Vec<JudgedCandidate>,

    /// Final keep segments in ascending order.
    pub keep_segments: Vec<PlanSegment>,
}

impl CutPlan {
    /// Assemble a plan from the pipeline's outputs.
    pub fn build(
        video: impl Into<PathBuf>,
        transcript: impl Into<PathBuf>,
        min_gap_secs: f64,
        context_size: usize,
        total_duration_secs: f64,
        candidates: Vec<JudgedCandidate>,
        keep_segments: &[KeepSegment],
    ) -> Self {
        let estimated: f64 = keep_segments.iter().map(KeepSegment::duration_secs).sum();
        Self {
            video: video.into(),
            transcript: transcript.into(),
            min_gap_secs,
            context_size,
            total_duration_secs: round_millis(total_duration_secs),
            estimated_duration_secs: round_millis(estimated),
            candidates,
            keep_segments: keep_segments
                .iter()
                .map(|seg| PlanSegment {
                    start_secs: round_millis(seg.start_secs),
                    end_secs: round_millis(seg.end_secs),
                    duration_secs: round_millis(seg.duration_secs()),
                })
                .collect(),
        }
    }

    /// Serialize to deterministic pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, PlanError> {
        serde_json::to_string_pretty(self).map_err(|e| PlanError::ParseError {
            context: "cut plan".to_string(),
            source: e,
        })
    }

    /// Write the plan to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlanError> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| PlanError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a plan from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| PlanError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| PlanError::ParseError {
            context: format!("cut plan at {}", path.display()),
            source: e,
        })
    }
}

/// Render keep segments as CSV with a `start_sec,end_sec,duration_sec`
/// header, all values to exactly 3 decimals.
pub fn keep_segments_csv(segments: &[KeepSegment]) -> String {
    let mut csv = String::from("start_sec,end_sec,duration_sec\n");
    for seg in segments {
        csv.push_str(&format!(
            "{:.3},{:.3},{:.3}\n",
            seg.start_secs,
            seg.end_secs,
            seg.duration_secs()
        ));
    }
    csv
}

/// Round to millisecond precision for stable serialized output.
fn round_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Errors that can occur when working with plans.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("IO error at {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {context}: {source}")]
    ParseError {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}
