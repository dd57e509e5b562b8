//! Gap detection over the caption timeline.

use stillcut_plan_model::{CaptionEntry, GapCandidate};

/// Gap detection parameters.
#[derive(Debug, Clone)]
pub struct GapConfig {
    /// Minimum inter-caption silence to emit a candidate (seconds).
    /// Boundary equality qualifies: a gap of exactly this length is emitted.
    pub min_gap_secs: f64,

    /// Captions of context carried on each side of a candidate.
    pub context_size: usize,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            min_gap_secs: 0.8,
            context_size: 2,
        }
    }
}

/// Scan consecutive captions and emit one candidate per qualifying silence.
///
/// Candidate ids are derived from the pair index (`gap_{i}`), so re-running
/// on identical input yields identical ids — the decision engine's
/// response matching relies on this. Captions must already be sorted by
/// start time.
pub fn detect_gaps(captions: &[CaptionEntry], config: &GapConfig) -> Vec<GapCandidate> {
    let mut candidates = Vec::new();
    if captions.len() < 2 {
        return candidates;
    }

    for i in 0..captions.len() - 1 {
        let current = &captions[i];
        let next = &captions[i + 1];
        let gap = next.start_secs - current.end_secs;
        if gap < config.min_gap_secs {
            continue;
        }

        let before_start = (i + 1).saturating_sub(config.context_size);
        let after_end = (i + 1 + config.context_size).min(captions.len());
        candidates.push(GapCandidate {
            id: format!("gap_{i}"),
            gap_start_secs: current.end_secs,
            gap_end_secs: next.start_secs,
            gap_duration_secs: gap,
            context_before: captions[before_start..=i].to_vec(),
            context_after: captions[i + 1..after_end].to_vec(),
        });
    }

    tracing::debug!(
        captions = captions.len(),
        candidates = candidates.len(),
        min_gap_secs = config.min_gap_secs,
        "Gap detection complete"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captions(spans: &[(f64, f64)]) -> Vec<CaptionEntry> {
        spans
            .iter()
            .enumerate()
            .map(|(i, (start, end))| CaptionEntry::new(*start, *end, format!("caption {i}")))
            .collect()
    }

    #[test]
    fn test_gap_at_threshold_qualifies() {
        let caps = captions(&[(0.0, 2.0), (2.8, 4.0)]);
        let config = GapConfig {
            min_gap_secs: 0.8,
            context_size: 2,
        };
        let found = detect_gaps(&caps, &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "gap_0");
        assert_eq!(found[0].gap_start_secs, 2.0);
        assert_eq!(found[0].gap_end_secs, 2.8);
    }

    #[test]
    fn test_gap_below_threshold_skipped() {
        let caps = captions(&[(0.0, 2.0), (2.7, 4.0)]);
        let config = GapConfig {
            min_gap_secs: 0.8,
            context_size: 2,
        };
        assert!(detect_gaps(&caps, &config).is_empty());
    }

    #[test]
    fn test_overlapping_captions_never_qualify() {
        let caps = captions(&[(0.0, 3.0), (2.0, 5.0)]);
        assert!(detect_gaps(&caps, &GapConfig::default()).is_empty());
    }

    #[test]
    fn test_ids_follow_pair_index() {
        // Gaps after captions 0 and 2; the skipped pair keeps its index.
        let caps = captions(&[(0.0, 1.0), (3.0, 4.0), (4.1, 5.0), (8.0, 9.0)]);
        let found = detect_gaps(&caps, &GapConfig::default());
        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["gap_0", "gap_2"]);
    }

    #[test]
    fn test_context_windows_clamped_at_bounds() {
        let caps = captions(&[(0.0, 1.0), (3.0, 4.0), (4.1, 5.0), (8.0, 9.0)]);
        let config = GapConfig {
            min_gap_secs: 0.8,
            context_size: 3,
        };
        let found = detect_gaps(&caps, &config);

        // First gap: only one caption exists before it.
        assert_eq!(found[0].context_before.len(), 1);
        assert_eq!(found[0].context_after.len(), 3);

        // Last gap: only one caption exists after it.
        assert_eq!(found[1].context_before.len(), 3);
        assert_eq!(found[1].context_after.len(), 1);
    }

    #[test]
    fn test_context_includes_flanking_captions() {
        let caps = captions(&[(0.0, 1.0), (1.2, 2.0), (5.0, 6.0), (6.1, 7.0)]);
        let found = detect_gaps(&caps, &GapConfig::default());
        assert_eq!(found.len(), 1);
        let cand = &found[0];
        assert_eq!(cand.context_before.last().unwrap().end_secs, 2.0);
        assert_eq!(cand.context_after.first().unwrap().start_secs, 5.0);
    }

    #[test]
    fn test_fewer_than_two_captions() {
        assert!(detect_gaps(&[], &GapConfig::default()).is_empty());
        let one = captions(&[(0.0, 1.0)]);
        assert!(detect_gaps(&one, &GapConfig::default()).is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let caps = captions(&[(0.0, 1.0), (3.0, 4.0), (7.0, 8.0)]);
        let a = detect_gaps(&caps, &GapConfig::default());
        let b = detect_gaps(&caps, &GapConfig::default());
        assert_eq!(a, b);
    }
}
