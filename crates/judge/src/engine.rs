//! Batched adjudication with strict validation and bounded retry.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde_json::Value;

use stillcut_common::error::{StillcutError, StillcutResult};
use stillcut_plan_model::{Decision, GapCandidate, GapDecision};

use crate::client::TextCompletion;
use crate::prompt::build_prompt;

/// Drives the adjudication of gap candidates against a completion service.
///
/// Batches are dispatched strictly sequentially. Each batch either resolves
/// to a full decision set (one decision per requested id, no extras) or
/// fails after `max_retries + 1` attempts, which aborts the whole run and
/// discards every previously resolved batch. An incomplete decision set
/// would silently misclassify gaps downstream, so there is no partial
/// success.
pub struct DecisionEngine {
    batch_size: usize,
    max_retries: u32,
    retry_delay: Duration,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// State of one batch's retry loop.
#[derive(Debug)]
enum BatchState {
    /// Awaiting attempt number `attempt` (0-based).
    Pending { attempt: u32 },
    /// The batch produced a full, valid decision set.
    Resolved(Vec<Decision>),
    /// All attempts exhausted.
    Failed { attempts: u32 },
}

impl DecisionEngine {
    /// Create an engine with the given batch size and retry bound.
    pub fn new(batch_size: usize, max_retries: u32) -> Self {
        Self {
            batch_size: batch_size.max(1),
            max_retries,
            ..Self::default()
        }
    }

    /// Override the fixed delay between attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Adjudicate all candidates, returning one decision per candidate in
    /// dispatch order.
    pub async fn decide(
        &self,
        candidates: &[GapCandidate],
        client: &dyn TextCompletion,
    ) -> StillcutResult<Vec<Decision>> {
        let mut decisions = Vec::with_capacity(candidates.len());
        if candidates.is_empty() {
            return Ok(decisions);
        }

        let batch_count = candidates.len().div_ceil(self.batch_size);
        for (index, batch) in candidates.chunks(self.batch_size).enumerate() {
            tracing::info!(
                batch = index + 1,
                batches = batch_count,
                candidates = batch.len(),
                "Dispatching adjudication batch"
            );
            match self.resolve_batch(batch, client).await {
                BatchState::Resolved(batch_decisions) => decisions.extend(batch_decisions),
                BatchState::Failed { attempts } => {
                    return Err(StillcutError::validation(format!(
                        "batch {}/{batch_count} still invalid after {attempts} attempts",
                        index + 1
                    )));
                }
                BatchState::Pending { .. } => unreachable!("resolve_batch returns terminal states"),
            }
        }
        Ok(decisions)
    }

    /// Run one batch's retry loop to a terminal state.
    async fn resolve_batch(&self, batch: &[GapCandidate], client: &dyn TextCompletion) -> BatchState {
        let prompt = build_prompt(batch);
        let mut state = BatchState::Pending { attempt: 0 };
        loop {
            state = match state {
                BatchState::Pending { attempt } => {
                    if attempt > 0 {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                    match client.generate(&prompt).await {
                        Ok(text) => match extract_payload(&text)
                            .and_then(|payload| validate_response(&payload, batch))
                        {
                            Some(decisions) => BatchState::Resolved(decisions),
                            None => {
                                tracing::warn!(
                                    attempt = attempt + 1,
                                    "Judge response failed validation"
                                );
                                self.next_state(attempt)
                            }
                        },
                        Err(e) => {
                            tracing::warn!(attempt = attempt + 1, error = %e, "Judge call failed");
                            self.next_state(attempt)
                        }
                    }
                }
                terminal => return terminal,
            };
        }
    }

    fn next_state(&self, attempt: u32) -> BatchState {
        if attempt >= self.max_retries {
            BatchState::Failed {
                attempts: attempt + 1,
            }
        } else {
            BatchState::Pending {
                attempt: attempt + 1,
            }
        }
    }
}

/// Pull a JSON payload out of a raw model response.
///
/// Tries the trimmed text directly first; models that wrap their answer in
/// prose get a second chance via the first bracket-delimited span (greedy
/// to the last closing bracket, newlines included).
fn extract_payload(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let array = trimmed.find('[');
    let object = trimmed.find('{');
    let (open, close) = match (array, object) {
        (Some(a), Some(o)) if a < o => (a, trimmed.rfind(']')?),
        (Some(a), None) => (a, trimmed.rfind(']')?),
        (_, Some(o)) => (o, trimmed.rfind('}')?),
        (None, None) => return None,
    };
    if close <= open {
        return None;
    }
    serde_json::from_str(&trimmed[open..=close]).ok()
}

/// Validate a parsed payload against the batch's expected id set.
///
/// Returns the decisions in batch candidate order, or None when anything
/// about the payload disqualifies it: not an array, an id outside the
/// batch, a decision token other than exactly "CUT"/"KEEP", or an id set
/// that does not match the request exactly. Duplicated ids are tolerated
/// with last-occurrence-wins semantics.
fn validate_response(payload: &Value, batch: &[GapCandidate]) -> Option<Vec<Decision>> {
    let items = payload.as_array()?;
    let expected: HashSet<&str> = batch.iter().map(|c| c.id.as_str()).collect();

    let mut by_id: HashMap<String, Decision> = HashMap::new();
    for item in items {
        let Some(object) = item.as_object() else {
            continue;
        };
        let Some(id) = object.get("id").and_then(Value::as_str) else {
            continue;
        };
        if !expected.contains(id) {
            return None;
        }
        let decision = match object.get("decision").and_then(Value::as_str) {
            Some("CUT") => GapDecision::Cut,
            Some("KEEP") => GapDecision::Keep,
            _ => continue,
        };
        let reason = match object.get("reason") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        by_id.insert(
            id.to_string(),
            Decision {
                id: id.to_string(),
                decision,
                reason,
            },
        );
    }

    if by_id.len() != expected.len() {
        return None;
    }

    let mut decisions = Vec::with_capacity(batch.len());
    for cand in batch {
        decisions.push(by_id.remove(cand.id.as_str())?);
    }
    Some(decisions)
}
