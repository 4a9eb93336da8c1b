//! Job ordering policies.
//!
//! Before placement the driver orders the job list with one of five
//! interchangeable heuristics. Every heuristic is a stable sort on a single
//! numeric key computed fresh for each sort.
//!
//! # Usage
//!
//! ```
//! use u_conflict::dispatching::{JobOrdering, OrderingEngine};
//! use u_conflict::models::Instance;
//!
//! let instance = Instance::new(2, [4, 4, 4], [(1, 2)]);
//! let mut jobs = instance.jobs.clone();
//! let order = OrderingEngine::new(JobOrdering::MostConflictCountFirst).sort(&mut jobs);
//! assert_eq!(order, vec![1, 2, 0]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::OrderingEngine;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::error::ScheduleError;
use crate::models::Job;

/// Score returned by an ordering rule.
///
/// Lower scores = placed earlier.
pub type RuleScore = f64;

/// A rule that ranks jobs for placement.
///
/// # Score Convention
/// **Lower score = earlier placement.** Rules return smaller values for
/// jobs that should be offered to the workers first.
pub trait OrderingRule: Send + Sync + Debug {
    /// Short rule name (e.g., "MCDF").
    fn name(&self) -> &'static str;

    /// Scores a job. The job's `conflict_load` is fresh when
    /// [`OrderingRule::needs_conflict_load`] returns `true`.
    fn evaluate(&self, job: &Job) -> RuleScore;

    /// Whether `conflict_load` must be recomputed before evaluating.
    fn needs_conflict_load(&self) -> bool {
        false
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// The five built-in orderings.
///
/// The numeric codes are persisted by experiment logs and sweep
/// configurations and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobOrdering {
    /// Keep the current order (code 1).
    Fifo,
    /// Most conflicting partners first (code 2).
    MostConflictCountFirst,
    /// Largest unplaced conflict load first (code 3).
    #[default]
    MostConflictDurationFirst,
    /// Fewest conflicting partners first (code 4).
    LeastConflictCountFirst,
    /// Smallest unplaced conflict load first (code 5).
    LeastConflictDurationFirst,
}

impl JobOrdering {
    /// All orderings, in code order.
    pub const ALL: [JobOrdering; 5] = [
        JobOrdering::Fifo,
        JobOrdering::MostConflictCountFirst,
        JobOrdering::MostConflictDurationFirst,
        JobOrdering::LeastConflictCountFirst,
        JobOrdering::LeastConflictDurationFirst,
    ];

    /// Persisted numeric code.
    pub fn code(self) -> u8 {
        match self {
            JobOrdering::Fifo => 1,
            JobOrdering::MostConflictCountFirst => 2,
            JobOrdering::MostConflictDurationFirst => 3,
            JobOrdering::LeastConflictCountFirst => 4,
            JobOrdering::LeastConflictDurationFirst => 5,
        }
    }

    /// Parses a persisted numeric code.
    pub fn from_code(code: u8) -> Result<Self, ScheduleError> {
        match code {
            1 => Ok(JobOrdering::Fifo),
            2 => Ok(JobOrdering::MostConflictCountFirst),
            3 => Ok(JobOrdering::MostConflictDurationFirst),
            4 => Ok(JobOrdering::LeastConflictCountFirst),
            5 => Ok(JobOrdering::LeastConflictDurationFirst),
            other => Err(ScheduleError::UnknownOrdering(other)),
        }
    }

    /// The rule implementing this ordering.
    pub fn rule(self) -> &'static dyn OrderingRule {
        match self {
            JobOrdering::Fifo => &rules::Fifo,
            JobOrdering::MostConflictCountFirst => &rules::Mccf,
            JobOrdering::MostConflictDurationFirst => &rules::Mcdf,
            JobOrdering::LeastConflictCountFirst => &rules::Lccf,
            JobOrdering::LeastConflictDurationFirst => &rules::Lcdf,
        }
    }
}

impl fmt::Display for JobOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule().name())
    }
}
