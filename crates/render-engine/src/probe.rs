//! ffprobe helpers.

use std::path::Path;
use std::process::Command;

/// Whether a binary is reachable on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Whether the source file has at least one audio stream.
///
/// A missing or failing ffprobe is treated as "no audio", so rendering
/// still proceeds video-only.
pub fn probe_has_audio(path: &Path) -> bool {
    if !command_exists("ffprobe") {
        return false;
    }

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "a",
            "-show_entries",
            "stream=index",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output();

    match output {
        Ok(out) => !String::from_utf8_lossy(&out.stdout).trim().is_empty(),
        Err(_) => false,
    }
}
