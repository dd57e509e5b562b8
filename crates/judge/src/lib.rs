//! StillCut Pause Judge
//!
//! Sends detected gaps to an external text-completion service in fixed-size
//! batches and validates the structured verdicts that come back. The
//! service is treated as an untrusted, occasionally malformed black box:
//! every response is parsed defensively, a batch is accepted only when its
//! decision id set matches the request exactly, and invalid batches are
//! retried a bounded number of times before the whole run fails closed.

pub mod client;
pub mod engine;
mod prompt;

pub use client::{HttpTextCompletion, TextCompletion};
pub use engine::DecisionEngine;
