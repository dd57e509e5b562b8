//! StillCut Transcript Normalizer
//!
//! Turns raw caption text into an ordered `Vec<CaptionEntry>`. Three input
//! shapes are recognized without an explicit format flag:
//! - **SRT**: numbered blocks with `HH:MM:SS,mmm --> HH:MM:SS,mmm` ranges
//! - **WebVTT**: same ranges with a `WEBVTT` header and dot separators
//! - **Plain**: one `<start> <end> <text>` entry per line
//!
//! Output is always sorted by `(start, end)` — the gap detector depends
//! on temporal order.

pub mod parser;

pub use parser::{parse_timestamp, parse_transcript, parse_transcript_file};
