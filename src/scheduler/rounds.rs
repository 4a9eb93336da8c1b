//! Loose-round count heuristics.
//!
//! Derives how many loose rounds to run from the job count `n`, the
//! conflict percentage `p` and the worker count `w`. Every heuristic
//! returns at least 1.
//!
//! | Code | Heuristic | Rounds |
//! |------|-----------|--------|
//! | 1 | Linear scaling | `n·p / (100·w)` |
//! | 2 | Logarithmic | `ln(n·p + 1) / ln(w + 1)` |
//! | 3 | Exponential decay | `n · e^(−w / (p + 1))` |
//! | 4 | Adaptive threshold | `n / (w/2)` if `p > 50`, else `n / w` |
//! | 5 | Weighted combination | `n·p / (10·w) + ln(n + 1)` |
//!
//! Fractional results are truncated toward zero before the lower bound is
//! applied.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::Instance;

/// Heuristic for choosing the loose-round count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LooseRoundHeuristic {
    /// Code 1.
    LinearScaling,
    /// Code 2.
    Logarithmic,
    /// Code 3.
    ExponentialDecay,
    /// Code 4.
    AdaptiveThreshold,
    /// Code 5.
    WeightedCombination,
}

impl LooseRoundHeuristic {
    /// All heuristics, in code order.
    pub const ALL: [LooseRoundHeuristic; 5] = [
        LooseRoundHeuristic::LinearScaling,
        LooseRoundHeuristic::Logarithmic,
        LooseRoundHeuristic::ExponentialDecay,
        LooseRoundHeuristic::AdaptiveThreshold,
        LooseRoundHeuristic::WeightedCombination,
    ];

    /// Persisted numeric code.
    pub fn code(self) -> u8 {
        match self {
            LooseRoundHeuristic::LinearScaling => 1,
            LooseRoundHeuristic::Logarithmic => 2,
            LooseRoundHeuristic::ExponentialDecay => 3,
            LooseRoundHeuristic::AdaptiveThreshold => 4,
            LooseRoundHeuristic::WeightedCombination => 5,
        }
    }

    /// Parses a persisted numeric code.
    pub fn from_code(code: u8) -> Result<Self, ScheduleError> {
        match code {
            1 => Ok(LooseRoundHeuristic::LinearScaling),
            2 => Ok(LooseRoundHeuristic::Logarithmic),
            3 => Ok(LooseRoundHeuristic::ExponentialDecay),
            4 => Ok(LooseRoundHeuristic::AdaptiveThreshold),
            5 => Ok(LooseRoundHeuristic::WeightedCombination),
            other => Err(ScheduleError::UnknownRoundHeuristic(other)),
        }
    }

    /// Loose-round count for the given problem shape.
    ///
    /// # Errors
    /// [`ScheduleError::NoWorkersAvailable`] when `worker_count` is zero.
    pub fn rounds(
        self,
        job_count: usize,
        conflict_percentage: u32,
        worker_count: usize,
    ) -> Result<u32, ScheduleError> {
        if worker_count == 0 {
            return Err(ScheduleError::NoWorkersAvailable);
        }
        let n = job_count as u64;
        let p = u64::from(conflict_percentage);
        let w = worker_count as u64;

        let raw = match self {
            LooseRoundHeuristic::LinearScaling => (n * p / (100 * w)) as f64,
            LooseRoundHeuristic::Logarithmic => {
                ((n * p + 1) as f64).ln() / ((w + 1) as f64).ln()
            }
            LooseRoundHeuristic::ExponentialDecay => {
                n as f64 * (-(w as f64) / (p + 1) as f64).exp()
            }
            LooseRoundHeuristic::AdaptiveThreshold => {
                let divisor = if p > 50 { w / 2 } else { w };
                (n / divisor.max(1)) as f64
            }
            LooseRoundHeuristic::WeightedCombination => {
                (n * p / (w * 10)) as f64 + ((n + 1) as f64).ln().trunc()
            }
        };

        Ok((raw.trunc() as u32).max(1))
    }

    /// Loose-round count for an instance's shape.
    pub fn rounds_for(self, instance: &Instance) -> Result<u32, ScheduleError> {
        self.rounds(
            instance.job_count(),
            instance.conflict_percentage,
            instance.worker_count(),
        )
    }
}
