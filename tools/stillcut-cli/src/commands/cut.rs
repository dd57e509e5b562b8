//! Run the full pipeline: parse, detect, judge, reconstruct, write, render.

use std::path::PathBuf;

use stillcut_common::config::{api_key_from_env, AppConfig};
use stillcut_decision_core::gaps::{detect_gaps, GapConfig};
use stillcut_decision_core::reconstruct::{reconstruct, ReconstructConfig};
use stillcut_judge::{DecisionEngine, HttpTextCompletion};
use stillcut_plan_model::{join_decisions, keep_segments_csv, CutPlan};
use stillcut_render_engine::{render_video, RenderJob};
use stillcut_transcript::parse_transcript_file;

/// Resolved options for one `stillcut cut` invocation.
pub struct CutOptions {
    pub video: PathBuf,
    pub transcript: PathBuf,
    pub outdir: PathBuf,
    pub min_gap: f64,
    pub context: usize,
    pub batch_size: usize,
    pub max_retries: u32,
    pub min_keep: f64,
    pub merge_gap: f64,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub render: bool,
}

pub async fn run(opts: CutOptions) -> anyhow::Result<()> {
    if !opts.video.is_file() {
        anyhow::bail!("Video not found: {}", opts.video.display());
    }

    std::fs::create_dir_all(&opts.outdir)?;

    let captions = parse_transcript_file(&opts.transcript)?;
    println!("Captions parsed: {}", captions.len());

    let candidates = detect_gaps(
        &captions,
        &GapConfig {
            min_gap_secs: opts.min_gap,
            context_size: opts.context,
        },
    );
    println!("Gaps found: {}", candidates.len());

    let decisions = if candidates.is_empty() {
        Vec::new()
    } else {
        let config = AppConfig::load();
        let api_url = opts.api_url.unwrap_or(config.judge.api_url);
        let model = opts.model.unwrap_or(config.judge.model);
        let client = HttpTextCompletion::new(api_url, model, api_key_from_env());
        let engine = DecisionEngine::new(opts.batch_size, opts.max_retries);
        engine.decide(&candidates, &client).await?
    };

    let judged = join_decisions(&candidates, &decisions)?;
    let num_cut = judged.iter().filter(|j| j.is_cut()).count();
    let num_keep = judged.len() - num_cut;

    let (segments, total) = reconstruct(
        &captions,
        &judged,
        &ReconstructConfig {
            merge_gap_secs: opts.merge_gap,
            min_keep_secs: opts.min_keep,
        },
    );

    let plan = CutPlan::build(
        &opts.video,
        &opts.transcript,
        opts.min_gap,
        opts.context,
        total,
        judged,
        &segments,
    );
    let plan_path = opts.outdir.join("cut_plan.json");
    plan.save(&plan_path)?;
    let csv_path = opts.outdir.join("keep_segments.csv");
    std::fs::write(&csv_path, keep_segments_csv(&segments))?;

    // A render failure never invalidates the plan: report it and move on.
    let edited_path = opts.outdir.join("edited.mp4");
    let mut rendered = false;
    if opts.render && !segments.is_empty() {
        let job = RenderJob {
            input_path: opts.video.clone(),
            output_path: edited_path.clone(),
            segments: segments.clone(),
        };
        match render_video(job).await {
            Ok(_) => rendered = true,
            Err(e) => eprintln!("Render skipped: {e}"),
        }
    }

    println!("Decisions: CUT={num_cut} KEEP={num_keep}");
    println!("Original duration (from transcript): {total:.2}s");
    println!(
        "Estimated edited duration: {:.2}s",
        plan.estimated_duration_secs
    );
    println!("Cut plan: {}", plan_path.display());
    println!("Keep segments: {}", csv_path.display());
    if rendered {
        println!("Edited video: {}", edited_path.display());
    } else {
        println!("Edited video: not rendered");
    }

    Ok(())
}
