//! Check system capabilities.

use stillcut_common::config::{api_key_from_env, AppConfig};
use stillcut_render_engine::probe::command_exists;

pub fn run() -> anyhow::Result<()> {
    println!("StillCut System Check");
    println!("{}", "=".repeat(50));

    let ffmpeg_ok = command_exists("ffmpeg");
    if ffmpeg_ok {
        println!("[OK] ffmpeg found in PATH");
    } else {
        println!("[WARN] ffmpeg not found; rendering will be skipped");
    }

    if command_exists("ffprobe") {
        println!("[OK] ffprobe found in PATH");
    } else {
        println!("[WARN] ffprobe not found; sources will be treated as audio-less");
    }

    let config = AppConfig::load();
    println!("[OK] Judge endpoint: {}", config.judge.api_url);
    println!("[OK] Judge model: {}", config.judge.model);
    if api_key_from_env().is_some() {
        println!("[OK] STILLCUT_API_KEY is set");
    } else {
        println!("[WARN] STILLCUT_API_KEY is not set; only unauthenticated endpoints will work");
    }

    println!();
    if ffmpeg_ok {
        println!("StillCut is ready.");
    } else {
        println!("Plan generation will work; install ffmpeg to render edited video.");
    }

    Ok(())
}
