//! Keep-segment reconstruction from judged gaps.
//!
//! The cursor walk emits the complement of the CUT gaps, then two cleanup
//! passes run: a gap merge that absorbs splinters left between adjacent
//! cuts, and a minimum-length pass that folds too-short segments into a
//! neighbor. The min-length merge is left-biased on purpose: the first
//! segment donates its start forward, every other short segment extends
//! its predecessor. Changing that tie-break changes output determinism.

use stillcut_plan_model::{total_duration_secs, CaptionEntry, JudgedCandidate, KeepSegment};

/// Reconstruction parameters.
#[derive(Debug, Clone)]
pub struct ReconstructConfig {
    /// Segments separated by at most this residual gap are merged (seconds).
    pub merge_gap_secs: f64,

    /// Segments shorter than this are absorbed into a neighbor (seconds).
    pub min_keep_secs: f64,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            merge_gap_secs: 0.1,
            min_keep_secs: 0.25,
        }
    }
}

/// Compute the final keep segments and the total source duration.
///
/// Candidates must be in ascending (detection) order. Only CUT gaps
/// advance the cursor; KEEP gaps stay inside their surrounding segment.
pub fn reconstruct(
    captions: &[CaptionEntry],
    judged: &[JudgedCandidate],
    config: &ReconstructConfig,
) -> (Vec<KeepSegment>, f64) {
    let total = total_duration_secs(captions);

    let mut segments = Vec::new();
    let mut cursor = 0.0_f64;
    for cand in judged {
        if !cand.is_cut() {
            continue;
        }
        if cand.candidate.gap_start_secs > cursor {
            segments.push(KeepSegment::new(cursor, cand.candidate.gap_start_secs));
        }
        cursor = cursor.max(cand.candidate.gap_end_secs);
    }
    if total > cursor {
        segments.push(KeepSegment::new(cursor, total));
    }

    let segments = merge_by_gap(segments, config.merge_gap_secs);
    let segments = enforce_min_length(segments, config.min_keep_secs);

    tracing::debug!(
        segments = segments.len(),
        total_secs = total,
        "Reconstruction complete"
    );
    (segments, total)
}

/// Merge a segment into its predecessor when the residual gap between them
/// is at most `gap_threshold` seconds. Idempotent: no two adjacent output
/// segments remain within the threshold.
pub fn merge_by_gap(segments: Vec<KeepSegment>, gap_threshold: f64) -> Vec<KeepSegment> {
    let mut merged: Vec<KeepSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if let Some(last) = merged.last_mut() {
            if seg.start_secs - last.end_secs <= gap_threshold {
                last.end_secs = last.end_secs.max(seg.end_secs);
                continue;
            }
        }
        merged.push(seg);
    }
    merged
}

/// Absorb segments shorter than `min_len` into a neighbor until every
/// remaining segment qualifies. A lone segment is never dropped.
pub fn enforce_min_length(mut segments: Vec<KeepSegment>, min_len: f64) -> Vec<KeepSegment> {
    let mut i = 0;
    while i < segments.len() {
        if segments.len() == 1 || segments[i].duration_secs() >= min_len {
            i += 1;
            continue;
        }
        if i == 0 {
            // The first segment donates its start to the next one.
            let start = segments[0].start_secs;
            segments.remove(0);
            segments[0].start_secs = start;
        } else {
            // Everything else folds backward into its predecessor.
            let end = segments[i].end_secs;
            segments[i - 1].end_secs = end;
            segments.remove(i);
        }
    }
    segments
}
