//! Adjudication prompt rendering.

use stillcut_plan_model::{CaptionEntry, GapCandidate};

/// Render the adjudication request for one batch of candidates.
///
/// The output contract (a bare JSON array of id/decision/reason objects)
/// is stated up front; everything after `Candidates:` is data. Gap timings
/// and context timestamps use fixed 3-decimal formatting so identical
/// inputs always produce an identical prompt.
pub(crate) fn build_prompt(batch: &[GapCandidate]) -> String {
    let mut lines = Vec::new();
    lines.push(
        "Decide whether to CUT or KEEP each pause in a lecture video. \
         Keep pauses that add meaning (emphasis, transition, reflection). \
         Cut filler silence."
            .to_string(),
    );
    lines.push(
        r#"Respond with JSON only: [{"id":"...","decision":"CUT|KEEP","reason":"short"}]"#
            .to_string(),
    );
    lines.push("Candidates:".to_string());
    for cand in batch {
        lines.push(format!("ID: {}", cand.id));
        lines.push(format!(
            "gap_start: {:.3}, gap_end: {:.3}, gap_duration: {:.3}",
            cand.gap_start_secs, cand.gap_end_secs, cand.gap_duration_secs
        ));
        lines.push("context_before:".to_string());
        push_context(&mut lines, &cand.context_before);
        lines.push("context_after:".to_string());
        push_context(&mut lines, &cand.context_after);
    }
    lines.join("\n")
}

fn push_context(lines: &mut Vec<String>, entries: &[CaptionEntry]) {
    if entries.is_empty() {
        lines.push("(none)".to_string());
        return;
    }
    for entry in entries {
        let text = entry.text.replace('\n', " ");
        lines.push(format!(
            "{:.3}-{:.3} {}",
            entry.start_secs,
            entry.end_secs,
            text.trim()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_renders_candidate_fields() {
        let batch = vec![GapCandidate {
            id: "gap_3".to_string(),
            gap_start_secs: 12.5,
            gap_end_secs: 14.0,
            gap_duration_secs: 1.5,
            context_before: vec![CaptionEntry::new(10.0, 12.5, "before\ntext")],
            context_after: vec![],
        }];
        let prompt = build_prompt(&batch);

        assert!(prompt.contains("ID: gap_3"));
        assert!(prompt.contains("gap_start: 12.500, gap_end: 14.000, gap_duration: 1.500"));
        // Context newlines collapse to spaces; empty windows get a placeholder.
        assert!(prompt.contains("10.000-12.500 before text"));
        assert!(prompt.contains("context_after:\n(none)"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let batch = vec![GapCandidate {
            id: "gap_0".to_string(),
            gap_start_secs: 1.0,
            gap_end_secs: 2.0,
            gap_duration_secs: 1.0,
            context_before: vec![],
            context_after: vec![],
        }];
        assert_eq!(build_prompt(&batch), build_prompt(&batch));
    }
}
