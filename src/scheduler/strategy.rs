//! Solve strategy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::dispatching::JobOrdering;
use crate::error::ScheduleError;

/// How the driver places jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssignmentMode {
    /// Loose rounds first, then a strict sweep for the rest (code 1).
    #[default]
    Loose,
    /// Strict sweep only (code 2).
    Strict,
}

impl AssignmentMode {
    /// Persisted numeric code.
    pub fn code(self) -> u8 {
        match self {
            AssignmentMode::Loose => 1,
            AssignmentMode::Strict => 2,
        }
    }

    /// Parses a persisted numeric code.
    pub fn from_code(code: u8) -> Result<Self, ScheduleError> {
        match code {
            1 => Ok(AssignmentMode::Loose),
            2 => Ok(AssignmentMode::Strict),
            other => Err(ScheduleError::UnsupportedAssignmentMode(other)),
        }
    }
}

/// Configuration of one solve call.
///
/// # Example
///
/// ```
/// use u_conflict::dispatching::JobOrdering;
/// use u_conflict::scheduler::{AssignmentMode, Strategy};
///
/// let strategy = Strategy::default()
///     .with_ordering(JobOrdering::MostConflictCountFirst)
///     .with_loose_rounds(3);
/// assert_eq!(strategy.assignment, AssignmentMode::Loose);
/// assert_eq!(strategy.effective_loose_rounds(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Placement mode.
    pub assignment: AssignmentMode,
    /// Job ordering used in proposer mode.
    pub ordering: JobOrdering,
    /// Maximum loose rounds. Ignored in strict mode.
    pub loose_rounds: u32,
    /// Optional wall-clock budget for the loose phase.
    ///
    /// Checked between rounds. Once exceeded the remaining rounds are
    /// skipped and the strict sweep runs, so results become timing
    /// dependent.
    #[serde(default)]
    pub time_budget: Option<Duration>,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            assignment: AssignmentMode::Loose,
            ordering: JobOrdering::MostConflictDurationFirst,
            loose_rounds: 9,
            time_budget: None,
        }
    }
}

impl Strategy {
    /// Strict sweep with the given ordering.
    pub fn strict(ordering: JobOrdering) -> Self {
        Self {
            assignment: AssignmentMode::Strict,
            ordering,
            loose_rounds: 0,
            time_budget: None,
        }
    }

    /// Loose rounds with the given ordering.
    pub fn loose(ordering: JobOrdering, loose_rounds: u32) -> Self {
        Self {
            assignment: AssignmentMode::Loose,
            ordering,
            loose_rounds,
            time_budget: None,
        }
    }

    /// Builds a strategy from persisted codes.
    ///
    /// The mode follows from the round count: loose when `loose_rounds > 0`,
    /// strict otherwise.
    pub fn from_codes(ordering_code: u8, loose_rounds: u32) -> Result<Self, ScheduleError> {
        let ordering = JobOrdering::from_code(ordering_code)?;
        Ok(if loose_rounds > 0 {
            Self::loose(ordering, loose_rounds)
        } else {
            Self::strict(ordering)
        })
    }

    /// Sets the placement mode.
    pub fn with_assignment(mut self, assignment: AssignmentMode) -> Self {
        self.assignment = assignment;
        self
    }

    /// Sets the job ordering.
    pub fn with_ordering(mut self, ordering: JobOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the maximum number of loose rounds.
    pub fn with_loose_rounds(mut self, loose_rounds: u32) -> Self {
        self.loose_rounds = loose_rounds;
        self
    }

    /// Sets a wall-clock budget for the loose phase.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Number of loose rounds the driver actually runs.
    pub fn effective_loose_rounds(&self) -> u32 {
        match self.assignment {
            AssignmentMode::Loose => self.loose_rounds,
            AssignmentMode::Strict => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let s = Strategy::default();
        assert_eq!(s.assignment, AssignmentMode::Loose);
        assert_eq!(s.ordering, JobOrdering::MostConflictDurationFirst);
        assert_eq!(s.loose_rounds, 9);
        assert!(s.time_budget.is_none());
    }

    #[test]
    fn test_assignment_codes() {
        assert_eq!(AssignmentMode::from_code(1), Ok(AssignmentMode::Loose));
        assert_eq!(AssignmentMode::from_code(2), Ok(AssignmentMode::Strict));
        assert_eq!(AssignmentMode::Strict.code(), 2);
        assert_eq!(
            AssignmentMode::from_code(7),
            Err(ScheduleError::UnsupportedAssignmentMode(7))
        );
    }

    #[test]
    fn test_from_codes() {
        let s = Strategy::from_codes(2, 4).unwrap();
        assert_eq!(s.assignment, AssignmentMode::Loose);
        assert_eq!(s.ordering, JobOrdering::MostConflictCountFirst);
        assert_eq!(s.effective_loose_rounds(), 4);

        let s = Strategy::from_codes(5, 0).unwrap();
        assert_eq!(s.assignment, AssignmentMode::Strict);
        assert_eq!(s.ordering, JobOrdering::LeastConflictDurationFirst);

        assert_eq!(
            Strategy::from_codes(9, 1),
            Err(ScheduleError::UnknownOrdering(9))
        );
    }

    #[test]
    fn test_strict_ignores_rounds() {
        let s = Strategy::strict(JobOrdering::Fifo).with_loose_rounds(5);
        assert_eq!(s.effective_loose_rounds(), 0);
        let s = s.with_assignment(AssignmentMode::Loose);
        assert_eq!(s.effective_loose_rounds(), 5);
    }

    #[test]
    fn test_time_budget() {
        let s = Strategy::default().with_time_budget(Duration::from_millis(10));
        assert_eq!(s.time_budget, Some(Duration::from_millis(10)));
    }
}
