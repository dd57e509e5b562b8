//! StillCut CLI — Remove dead air from talk videos.
//!
//! Usage:
//!   stillcut cut --video talk.mp4 --transcript talk.srt   Run the full pipeline
//!   stillcut gaps <TRANSCRIPT>                            Detect silences only
//!   stillcut check                                        Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::cut::CutOptions;

#[derive(Parser)]
#[command(
    name = "stillcut",
    about = "AI-assisted dead-air removal for talk videos",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge silences and render the edited video
    Cut {
        /// Input video file
        #[arg(long)]
        video: PathBuf,

        /// Transcript file (SRT, WebVTT, or plain `start end text` lines)
        #[arg(long)]
        transcript: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "outputs")]
        outdir: PathBuf,

        /// Minimum silence to consider (seconds)
        #[arg(long, default_value = "0.8")]
        min_gap: f64,

        /// Captions of context before/after each gap
        #[arg(long, default_value = "2")]
        context: usize,

        /// Candidates per judge request
        #[arg(long, default_value = "10")]
        batch_size: usize,

        /// Additional attempts after a failed batch
        #[arg(long, default_value = "2")]
        max_retries: u32,

        /// Minimum keep-segment length (seconds)
        #[arg(long, default_value = "0.25")]
        min_keep: f64,

        /// Merge keep segments separated by at most this gap (seconds)
        #[arg(long, default_value = "0.1")]
        merge_gap: f64,

        /// Completion endpoint base URL (overrides config and env)
        #[arg(long)]
        api_url: Option<String>,

        /// Model identifier (overrides config and env)
        #[arg(long)]
        model: Option<String>,

        /// Skip video rendering
        #[arg(long)]
        no_render: bool,
    },

    /// Detect and print gap candidates without judging them
    Gaps {
        /// Transcript file (SRT, WebVTT, or plain)
        transcript: PathBuf,

        /// Minimum silence to consider (seconds)
        #[arg(long, default_value = "0.8")]
        min_gap: f64,

        /// Captions of context before/after each gap
        #[arg(long, default_value = "2")]
        context: usize,
    },

    /// Check system capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    stillcut_common::logging::init_logging(&stillcut_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Cut {
            video,
            transcript,
            outdir,
            min_gap,
            context,
            batch_size,
            max_retries,
            min_keep,
            merge_gap,
            api_url,
            model,
            no_render,
        } => {
            commands::cut::run(CutOptions {
                video,
                transcript,
                outdir,
                min_gap,
                context,
                batch_size,
                max_retries,
                min_keep,
                merge_gap,
                api_url,
                model,
                render: !no_render,
            })
            .await
        }
        Commands::Gaps {
            transcript,
            min_gap,
            context,
        } => commands::gaps::run(transcript, min_gap, context),
        Commands::Check => commands::check::run(),
    }
}
