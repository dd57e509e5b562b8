//! StillCut Render Engine
//!
//! Turns an ordered keep-segment plan into an edited video: each segment
//! is trimmed out of the source and the pieces are concatenated in order,
//! preserving the audio track when the source has one. All media work is
//! delegated to `ffmpeg`/`ffprobe` subprocesses — this crate never decodes
//! media itself.

pub mod probe;
pub mod render;

pub use render::{render_video, RenderBackend, RenderJob};
