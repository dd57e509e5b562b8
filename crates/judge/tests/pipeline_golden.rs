//! End-to-end pipeline scenario: detect → judge → join → reconstruct.

use std::time::Duration;

use async_trait::async_trait;

use stillcut_common::error::StillcutResult;
use stillcut_decision_core::gaps::{detect_gaps, GapConfig};
use stillcut_decision_core::reconstruct::{reconstruct, ReconstructConfig};
use stillcut_judge::{DecisionEngine, TextCompletion};
use stillcut_plan_model::{
    join_decisions, keep_segments_csv, CaptionEntry, CutPlan, GapDecision, KeepSegment,
};

struct FixedClient {
    response: String,
}

#[async_trait]
impl TextCompletion for FixedClient {
    async fn generate(&self, _prompt: &str) -> StillcutResult<String> {
        Ok(self.response.clone())
    }
}

fn talk_captions() -> Vec<CaptionEntry> {
    vec![
        CaptionEntry::new(0.0, 2.0, "welcome to the talk"),
        CaptionEntry::new(3.0, 5.0, "let that sink in"),
        CaptionEntry::new(10.0, 12.0, "and now the demo"),
    ]
}

#[tokio::test]
async fn keep_and_cut_decisions_rebuild_expected_segments() {
    let captions = talk_captions();
    let candidates = detect_gaps(&captions, &GapConfig::default());

    // Gaps of 1s (kept pause) and 5s (dead air).
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].id, "gap_0");
    assert_eq!(candidates[0].gap_start_secs, 2.0);
    assert_eq!(candidates[0].gap_end_secs, 3.0);
    assert_eq!(candidates[1].id, "gap_1");
    assert_eq!(candidates[1].gap_start_secs, 5.0);
    assert_eq!(candidates[1].gap_end_secs, 10.0);

    let client = FixedClient {
        response: r#"[
            {"id": "gap_0", "decision": "KEEP", "reason": "emphasis pause"},
            {"id": "gap_1", "decision": "CUT", "reason": "dead air"}
        ]"#
        .to_string(),
    };
    let engine = DecisionEngine::default().with_retry_delay(Duration::ZERO);
    let decisions = engine.decide(&candidates, &client).await.unwrap();
    assert_eq!(decisions.len(), 2);

    let judged = join_decisions(&candidates, &decisions).unwrap();
    assert_eq!(judged[0].decision, GapDecision::Keep);
    assert_eq!(judged[1].decision, GapDecision::Cut);

    let (segments, total) = reconstruct(&captions, &judged, &ReconstructConfig::default());
    assert_eq!(total, 12.0);
    assert_eq!(
        segments,
        vec![KeepSegment::new(0.0, 5.0), KeepSegment::new(10.0, 12.0)]
    );

    let plan = CutPlan::build("talk.mp4", "talk.srt", 0.8, 2, total, judged, &segments);
    assert_eq!(plan.total_duration_secs, 12.0);
    assert_eq!(plan.estimated_duration_secs, 7.0);
    assert_eq!(plan.keep_segments.len(), 2);

    let csv = keep_segments_csv(&segments);
    assert_eq!(
        csv,
        "start_sec,end_sec,duration_sec\n0.000,5.000,5.000\n10.000,12.000,2.000\n"
    );
}

#[tokio::test]
async fn all_cut_run_collapses_to_speech_only_segments() {
    let captions = talk_captions();
    let candidates = detect_gaps(&captions, &GapConfig::default());

    let client = FixedClient {
        response: r#"[
            {"id": "gap_0", "decision": "CUT", "reason": ""},
            {"id": "gap_1", "decision": "CUT", "reason": ""}
        ]"#
        .to_string(),
    };
    let engine = DecisionEngine::default().with_retry_delay(Duration::ZERO);
    let decisions = engine.decide(&candidates, &client).await.unwrap();
    let judged = join_decisions(&candidates, &decisions).unwrap();

    let (segments, total) = reconstruct(&captions, &judged, &ReconstructConfig::default());
    assert_eq!(total, 12.0);
    assert_eq!(
        segments,
        vec![
            KeepSegment::new(0.0, 2.0),
            KeepSegment::new(3.0, 5.0),
            KeepSegment::new(10.0, 12.0),
        ]
    );
}
