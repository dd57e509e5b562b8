//! StillCut Plan Model
//!
//! Defines the core data contracts for StillCut:
//! - **Captions:** Timestamped transcript entries, sorted by start time
//! - **Candidates:** Inter-caption silences with surrounding context
//! - **Decisions:** CUT/KEEP verdicts produced by the pause judge
//! - **Plans:** The final keep-segment list and its serialized audit trail
//!
//! All times are fractional seconds from the start of the source video.

pub mod candidate;
pub mod caption;
pub mod plan;

pub use candidate::*;
pub use caption::*;
pub use plan::*;
