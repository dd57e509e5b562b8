//! Property tests for the reconstruction passes.

use proptest::prelude::*;

use stillcut_decision_core::gaps::{detect_gaps, GapConfig};
use stillcut_decision_core::reconstruct::{
    enforce_min_length, merge_by_gap, reconstruct, ReconstructConfig,
};
use stillcut_plan_model::{CaptionEntry, GapDecision, JudgedCandidate, KeepSegment};

/// Ascending, non-overlapping segments built from (gap, length) deltas.
fn segments_strategy() -> impl Strategy<Value = Vec<KeepSegment>> {
    proptest::collection::vec((0.0f64..2.0, 0.01f64..3.0), 0..12).prop_map(|deltas| {
        let mut segments = Vec::new();
        let mut cursor = 0.0;
        for (gap, len) in deltas {
            let start = cursor + gap;
            let end = start + len;
            segments.push(KeepSegment::new(start, end));
            cursor = end;
        }
        segments
    })
}

/// Non-overlapping captions built from (gap, duration) deltas.
fn captions_strategy() -> impl Strategy<Value = Vec<CaptionEntry>> {
    proptest::collection::vec((0.0f64..3.0, 0.05f64..4.0), 2..16).prop_map(|deltas| {
        let mut captions = Vec::new();
        let mut cursor = 0.0;
        for (i, (gap, dur)) in deltas.into_iter().enumerate() {
            let start = cursor + gap;
            let end = start + dur;
            captions.push(CaptionEntry::new(start, end, format!("caption {i}")));
            cursor = end;
        }
        captions
    })
}

proptest! {
    #[test]
    fn merge_pass_is_idempotent(segments in segments_strategy(), threshold in 0.0f64..0.5) {
        let once = merge_by_gap(segments, threshold);
        let twice = merge_by_gap(once.clone(), threshold);
        prop_assert_eq!(&once, &twice);

        // And no two adjacent survivors remain within the threshold.
        for pair in once.windows(2) {
            prop_assert!(pair[1].start_secs - pair[0].end_secs > threshold);
        }
    }

    #[test]
    fn min_length_pass_terminates_with_qualifying_segments(
        segments in segments_strategy(),
        min_len in 0.0f64..2.0,
    ) {
        let result = enforce_min_length(segments, min_len);
        if result.len() > 1 {
            for seg in &result {
                prop_assert!(seg.duration_secs() >= min_len);
            }
        }
    }

    #[test]
    fn raw_segments_and_cut_gaps_tile_the_timeline(
        captions in captions_strategy(),
        decision_bits in any::<u64>(),
    ) {
        let candidates = detect_gaps(&captions, &GapConfig::default());
        let judged: Vec<JudgedCandidate> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| JudgedCandidate {
                candidate,
                decision: if (decision_bits >> (i % 64)) & 1 == 1 {
                    GapDecision::Cut
                } else {
                    GapDecision::Keep
                },
                reason: String::new(),
            })
            .collect();

        // Disable the cleanup passes to observe the raw walk.
        let config = ReconstructConfig {
            merge_gap_secs: 0.0,
            min_keep_secs: 0.0,
        };
        let (segments, total) = reconstruct(&captions, &judged, &config);

        // Union of keep segments and CUT gap intervals covers [0, total]
        // exactly, with no gaps and no overlaps.
        let mut intervals: Vec<(f64, f64)> = segments
            .iter()
            .map(|s| (s.start_secs, s.end_secs))
            .collect();
        intervals.extend(
            judged
                .iter()
                .filter(|j| j.is_cut())
                .map(|j| (j.candidate.gap_start_secs, j.candidate.gap_end_secs)),
        );
        intervals.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut cursor = 0.0;
        for (start, end) in intervals {
            prop_assert!((start - cursor).abs() < 1e-9);
            prop_assert!(end >= start);
            cursor = end;
        }
        prop_assert!((cursor - total).abs() < 1e-9);
    }
}
