//! Caption format detection and parsing.

use std::path::Path;

use stillcut_common::error::{StillcutError, StillcutResult};
use stillcut_plan_model::caption::{sort_captions, CaptionEntry};

/// Recognized transcript shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TranscriptFormat {
    /// SRT/WebVTT style: timed blocks introduced by a `-->` range line.
    Subtitle,
    /// One `<start> <end> <text>` entry per line.
    Plain,
}

/// Read and parse a transcript file.
pub fn parse_transcript_file(path: impl AsRef<Path>) -> StillcutResult<Vec<CaptionEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StillcutError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        StillcutError::parse(format!("failed to read transcript {}: {e}", path.display()))
    })?;
    parse_transcript(&content)
}

/// Parse raw caption text into sorted caption entries.
///
/// Format is auto-detected: a `WEBVTT` header line or any well-formed
/// time-range line selects subtitle parsing, otherwise every line is
/// treated as a plain `<start> <end> <text>` entry.
pub fn parse_transcript(content: &str) -> StillcutResult<Vec<CaptionEntry>> {
    let lines: Vec<&str> = content.lines().collect();
    let format = detect_format(&lines);
    tracing::debug!(?format, lines = lines.len(), "Parsing transcript");

    let mut entries = match format {
        TranscriptFormat::Subtitle => parse_subtitle(&lines)?,
        TranscriptFormat::Plain => parse_plain(&lines),
    };

    sort_captions(&mut entries);
    Ok(entries)
}

fn detect_format(lines: &[&str]) -> TranscriptFormat {
    if lines
        .iter()
        .any(|line| line.trim().eq_ignore_ascii_case("WEBVTT"))
    {
        return TranscriptFormat::Subtitle;
    }
    if lines.iter().any(|line| is_time_range_line(line.trim())) {
        return TranscriptFormat::Subtitle;
    }
    TranscriptFormat::Plain
}

/// Parse subtitle-style blocks: an optional numeric cue index, a time-range
/// line, then text lines joined with single spaces until a blank line.
fn parse_subtitle(lines: &[&str]) -> StillcutResult<Vec<CaptionEntry>> {
    let mut entries = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let mut line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        // A pure-numeric cue index directly before a range line is skipped.
        if line.chars().all(|c| c.is_ascii_digit())
            && i + 1 < lines.len()
            && lines[i + 1].contains("-->")
        {
            i += 1;
            line = lines[i].trim();
        }

        if let Some((start_token, end_token)) = split_time_range(line) {
            let start_secs = parse_timestamp(start_token)?;
            let end_secs = parse_timestamp(end_token)?;

            i += 1;
            let mut text_lines = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                text_lines.push(lines[i].trim());
                i += 1;
            }
            entries.push(CaptionEntry::new(start_secs, end_secs, text_lines.join(" ")));
        } else {
            // Header or stray line outside any block.
            i += 1;
        }
    }
    Ok(entries)
}

/// Parse plain `<start> <end> <text>` lines. Lines whose two leading time
/// tokens fail to parse are silently skipped.
fn parse_plain(lines: &[&str]) -> Vec<CaptionEntry> {
    let mut entries = Vec::new();
    for line in lines {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        let parts: Vec<&str> = stripped.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }
        let (Ok(start_secs), Ok(end_secs)) =
            (parse_time_token(parts[0]), parse_time_token(parts[1]))
        else {
            continue;
        };
        entries.push(CaptionEntry::new(start_secs, end_secs, parts[2..].join(" ")));
    }
    entries
}

/// Split a cue timing line into start/end tokens.
///
/// Trailing WebVTT cue settings after the end timestamp are dropped.
/// Returns None when the line does not contain a `-->` separator.
fn split_time_range(line: &str) -> Option<(&str, &str)> {
    let (left, right) = line.split_once("-->")?;
    let start = left.trim();
    let end = right.trim().split_whitespace().next()?;
    if start.is_empty() {
        return None;
    }
    Some((start, end))
}

/// Whether a line is a fully well-formed time-range line.
fn is_time_range_line(line: &str) -> bool {
    match split_time_range(line) {
        Some((start, end)) => parse_timestamp(start).is_ok() && parse_timestamp(end).is_ok(),
        None => false,
    }
}

/// Parse a colon-delimited timestamp (`H:MM:SS.mmm`) into seconds.
///
/// A comma is accepted as the fractional separator (SRT convention) and
/// normalized to a dot. Exactly three colon-delimited numeric fields are
/// required; anything else is a parse error.
pub fn parse_timestamp(token: &str) -> StillcutResult<f64> {
    let normalized = token.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() != 3 {
        return Err(StillcutError::parse(format!("invalid timestamp: {token}")));
    }
    let hours: u64 = parts[0]
        .parse()
        .map_err(|_| StillcutError::parse(format!("invalid timestamp: {token}")))?;
    let minutes: u64 = parts[1]
        .parse()
        .map_err(|_| StillcutError::parse(format!("invalid timestamp: {token}")))?;
    let seconds: f64 = parts[2]
        .parse()
        .map_err(|_| StillcutError::parse(format!("invalid timestamp: {token}")))?;
    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Parse a plain-format time token: colon-delimited timestamp or bare
/// floating-point seconds.
fn parse_time_token(token: &str) -> StillcutResult<f64> {
    if token.contains(':') {
        return parse_timestamp(token);
    }
    token
        .parse::<f64>()
        .map_err(|_| StillcutError::parse(format!("invalid time token: {token}")))
}
