//! StillCut Decision Core
//!
//! Pure computation over the caption timeline:
//! - **Gap detection:** find inter-caption silences worth adjudicating,
//!   each with a bounded window of surrounding captions
//! - **Reconstruction:** turn per-gap CUT/KEEP decisions into a minimal,
//!   clean list of keep segments
//!
//! This crate is pure computation — no I/O, no service calls. All inputs
//! are data; all outputs are data.

pub mod gaps;
pub mod reconstruct;

pub use gaps::{detect_gaps, GapConfig};
pub use reconstruct::{reconstruct, ReconstructConfig};
