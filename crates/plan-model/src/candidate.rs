//! Gap candidates and judge decisions.
//!
//! A `GapCandidate` is one inter-caption silence plus the captions around
//! it. The pause judge returns exactly one `Decision` per candidate;
//! `join_decisions` welds the two lists into `JudgedCandidate`s and treats
//! any missing, unknown, or duplicate id as a hard validation failure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::caption::CaptionEntry;
use crate::plan::PlanError;

/// An inter-caption silence that qualifies for adjudication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapCandidate {
    /// Stable identifier derived from the caption pair index (`gap_{i}`).
    pub id: String,

    /// Silence start: end of the caption before the gap.
    pub gap_start_secs: f64,

    /// Silence end: start of the caption after the gap.
    pub gap_end_secs: f64,

    /// `gap_end_secs - gap_start_secs`.
    pub gap_duration_secs: f64,

    /// Up to `context_size` captions ending at the gap, oldest first.
    pub context_before: Vec<CaptionEntry>,

    /// Up to `context_size` captions following the gap, earliest first.
    pub context_after: Vec<CaptionEntry>,
}

/// Verdict for a single gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GapDecision {
    /// Remove the silence from the edit.
    Cut,
    /// The pause carries meaning; leave it in.
    Keep,
}

impl GapDecision {
    /// Wire representation, matching the judge protocol exactly.
    pub fn as_str(&self) -> &'static str {
        match self {
            GapDecision::Cut => "CUT",
            GapDecision::Keep => "KEEP",
        }
    }
}

impl std::fmt::Display for GapDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One adjudicated gap, as returned by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Must match a requested `GapCandidate` id.
    pub id: String,

    /// CUT or KEEP.
    pub decision: GapDecision,

    /// Free-form justification from the judge (may be empty).
    pub reason: String,
}

/// A gap candidate annotated with its final decision.
///
/// Produced by [`join_decisions`]; the candidate itself is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgedCandidate {
    #[serde(flatten)]
    pub candidate: GapCandidate,

    /// The verdict for this gap.
    pub decision: GapDecision,

    /// Justification attached to the verdict.
    pub reason: String,
}

impl JudgedCandidate {
    /// Whether this gap is marked for removal.
    pub fn is_cut(&self) -> bool {
        self.decision == GapDecision::Cut
    }
}

/// Join candidates with their decisions, in candidate order.
///
/// The decision set must cover the candidate set exactly: a candidate
/// without a decision, a decision for an unknown id, or a duplicated id
/// are all invariant violations (the engine guarantees id-set exactness,
/// so any mismatch here means a bug upstream, not judge noise).
pub fn join_decisions(
    candidates: &[GapCandidate],
    decisions: &[Decision],
) -> Result<Vec<JudgedCandidate>, PlanError> {
    let mut by_id: HashMap<&str, &Decision> = HashMap::with_capacity(decisions.len());
    for decision in decisions {
        if by_id.insert(decision.id.as_str(), decision).is_some() {
            return Err(PlanError::ValidationError {
                message: format!("duplicate decision id: {}", decision.id),
            });
        }
    }

    let mut judged = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let decision = by_id.remove(candidate.id.as_str()).ok_or_else(|| {
            PlanError::ValidationError {
                message: format!("no decision for candidate id: {}", candidate.id),
            }
        })?;
        judged.push(JudgedCandidate {
            candidate: candidate.clone(),
            decision: decision.decision,
            reason: decision.reason.clone(),
        });
    }

    if let Some(stray) = by_id.keys().next() {
        return Err(PlanError::ValidationError {
            message: format!("decision for unknown candidate id: {stray}"),
        });
    }

    Ok(judged)
}
