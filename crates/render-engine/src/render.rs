//! Trim-and-concat rendering of keep segments.

use std::path::PathBuf;
use std::process::Command;

use stillcut_common::error::{StillcutError, StillcutResult};
use stillcut_plan_model::KeepSegment;

use crate::probe::{command_exists, probe_has_audio};

/// A render job ready to be executed.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Source video path.
    pub input_path: PathBuf,

    /// Output file path.
    pub output_path: PathBuf,

    /// Ascending, non-overlapping segments to keep.
    pub segments: Vec<KeepSegment>,
}

/// Trait for render backends.
pub trait RenderBackend: Send {
    /// Execute the render job.
    fn render(&mut self, job: &RenderJob) -> StillcutResult<()>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Render the edited video.
///
/// This is the main entry point for rendering.
pub async fn render_video(job: RenderJob) -> StillcutResult<PathBuf> {
    tracing::info!(
        input = %job.input_path.display(),
        output = %job.output_path.display(),
        segments = job.segments.len(),
        "Starting render"
    );

    if job.segments.is_empty() {
        return Err(StillcutError::render("no segments to render"));
    }
    if !job.input_path.exists() {
        return Err(StillcutError::FileNotFound {
            path: job.input_path.clone(),
        });
    }
    if let Some(parent) = job.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut backend: Box<dyn RenderBackend> = Box::new(FfmpegBackend::new());
    if !backend.is_available() {
        return Err(StillcutError::unsupported(
            "No supported render backend found (expected ffmpeg in PATH)",
        ));
    }

    tracing::info!(backend = backend.name(), "Using render backend");
    backend.render(&job)?;

    Ok(job.output_path)
}

struct FfmpegBackend;

impl FfmpegBackend {
    fn new() -> Self {
        Self
    }
}

impl RenderBackend for FfmpegBackend {
    fn render(&mut self, job: &RenderJob) -> StillcutResult<()> {
        let started = std::time::Instant::now();
        let has_audio = probe_has_audio(&job.input_path);
        let filter = build_filter_graph(&job.segments, has_audio);

        let mut args: Vec<String> = vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            job.input_path.display().to_string(),
            "-filter_complex".to_string(),
            filter,
            "-map".to_string(),
            "[v]".to_string(),
        ];
        if has_audio {
            args.push("-map".to_string());
            args.push("[a]".to_string());
        }
        args.push("-movflags".to_string());
        args.push("+faststart".to_string());
        args.push(job.output_path.display().to_string());

        tracing::debug!(args = ?args, "Running ffmpeg");
        let output = Command::new("ffmpeg")
            .args(&args)
            .output()
            .map_err(|e| StillcutError::render(format!("Failed to start ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StillcutError::render(format!(
                "ffmpeg failed (status {}): {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(
            has_audio,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Render finished"
        );
        Ok(())
    }

    fn is_available(&self) -> bool {
        command_exists("ffmpeg")
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// Build the trim/concat filter graph for the segment list.
///
/// Each segment becomes a `trim`+`setpts` chain (and `atrim`+`asetpts`
/// when audio is present); a final `concat` joins the pieces in order.
fn build_filter_graph(segments: &[KeepSegment], has_audio: bool) -> String {
    let mut filters = Vec::new();
    let mut concat_inputs = String::new();

    for (idx, seg) in segments.iter().enumerate() {
        filters.push(format!(
            "[0:v]trim=start={start:.3}:end={end:.3},setpts=PTS-STARTPTS[v{idx}]",
            start = seg.start_secs,
            end = seg.end_secs,
        ));
        concat_inputs.push_str(&format!("[v{idx}]"));
        if has_audio {
            filters.push(format!(
                "[0:a]atrim=start={start:.3}:end={end:.3},asetpts=PTS-STARTPTS[a{idx}]",
                start = seg.start_secs,
                end = seg.end_secs,
            ));
            concat_inputs.push_str(&format!("[a{idx}]"));
        }
    }

    let outputs = if has_audio { "[v][a]" } else { "[v]" };
    let audio_count = if has_audio { 1 } else { 0 };
    filters.push(format!(
        "{concat_inputs}concat=n={}:v=1:a={audio_count}{outputs}",
        segments.len()
    ));
    filters.join(";")
}
