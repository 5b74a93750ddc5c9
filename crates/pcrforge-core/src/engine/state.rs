use crate::core::models::candidate::Candidate;

/// Why a search stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    IterationLimit,
    Stagnation,
}

/// Best candidate seen by one search, with how the search ended.
///
/// `best`'s rule list reflects `best_cost`.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Candidate,
    pub best_cost: f64,
    pub target_cost: f64,
    pub iterations: usize,
    pub stop_reason: StopReason,
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        self.best_cost <= self.target_cost
    }

    /// The best candidate if it meets the target.
    pub fn into_candidate(self) -> Option<Candidate> {
        if self.is_success() {
            Some(self.best)
        } else {
            None
        }
    }
}
