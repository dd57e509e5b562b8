//! Detect and print gap candidates without judging them.

use std::path::PathBuf;

use stillcut_decision_core::gaps::{detect_gaps, GapConfig};
use stillcut_transcript::parse_transcript_file;

pub fn run(transcript: PathBuf, min_gap: f64, context: usize) -> anyhow::Result<()> {
    println!("Analyzing transcript: {}", transcript.display());

    let captions = parse_transcript_file(&transcript)?;
    println!("  Loaded {} captions", captions.len());

    let candidates = detect_gaps(
        &captions,
        &GapConfig {
            min_gap_secs: min_gap,
            context_size: context,
        },
    );

    if candidates.is_empty() {
        println!("  No silences at or above {min_gap:.2}s.");
        return Ok(());
    }

    println!("  {} silence(s) at or above {min_gap:.2}s:\n", candidates.len());
    for cand in &candidates {
        println!(
            "{}  {:.3} -> {:.3}  ({:.3}s)",
            cand.id, cand.gap_start_secs, cand.gap_end_secs, cand.gap_duration_secs
        );
        if let Some(before) = cand.context_before.last() {
            println!("    before: {}", before.text);
        }
        if let Some(after) = cand.context_after.first() {
            println!("    after:  {}", after.text);
        }
    }

    Ok(())
}
