//! Plan (solution) summary.
//!
//! The summary is the whole contract with downstream consumers: the
//! per-job assignment, per-worker totals and the headline metrics.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! (parallel machine models, `P | | C_max`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::{JobId, Time, WorkerId};

/// Which phase of the driver committed a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPhase {
    /// Tentative placement during the given loose round (0-based).
    Loose {
        /// Round index.
        round: u32,
    },
    /// Guaranteed placement in the final sweep.
    Strict,
}

impl PlacementPhase {
    /// Whether this is a loose-round placement.
    pub fn is_loose(&self) -> bool {
        matches!(self, Self::Loose { .. })
    }
}

/// Outcome status of a solve.
///
/// The greedy driver always produces a feasible plan, so `Possible` is the
/// only status it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A feasible, not necessarily optimal, plan.
    Possible,
}

impl SolveStatus {
    /// Lowercase name as written to experiment logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Possible => "possible",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and when a job runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAssignment {
    /// Job id.
    pub id: JobId,
    /// Assigned worker.
    pub worker_id: WorkerId,
    /// Start time.
    pub start: Time,
    /// End time.
    pub end: Time,
    /// Gap left on the worker before this job.
    pub idle: Time,
    /// Global commit order (0 = first job committed).
    pub sequence: usize,
    /// Driver phase that placed the job.
    pub phase: PlacementPhase,
}

impl JobAssignment {
    /// `end - start`.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    /// Whether the two half-open intervals intersect.
    #[inline]
    pub fn overlaps(&self, other: &JobAssignment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Final state of one worker timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    /// Worker id.
    pub id: WorkerId,
    /// Jobs in commit order (equivalently, start order).
    pub jobs: Vec<JobId>,
    /// End of the last job, or 0.
    pub next_free_time: Time,
    /// Sum of job durations.
    pub busy_time: Time,
    /// Sum of idle gaps.
    pub idle_time: Time,
}

/// Result of one solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Completion time of the last worker.
    pub makespan: Time,
    /// Sum of all durations.
    pub horizon: Time,
    /// Solver wall-clock time.
    pub wall_time: Duration,
    /// Solve status.
    pub status: SolveStatus,
    /// Assignment per job, ordered by job id.
    pub per_job: Vec<JobAssignment>,
    /// Per-worker timelines, ordered by worker id.
    pub workers: Vec<WorkerSummary>,
}

impl PlanSummary {
    /// `horizon / makespan`. Zero for an empty plan.
    pub fn speedup(&self) -> f64 {
        if self.makespan == 0 {
            0.0
        } else {
            self.horizon as f64 / self.makespan as f64
        }
    }

    /// Wall time in fractional milliseconds.
    pub fn wall_time_ms(&self) -> f64 {
        self.wall_time.as_secs_f64() * 1000.0
    }

    /// Assignment of a given job.
    pub fn assignment(&self, id: JobId) -> Option<&JobAssignment> {
        self.per_job.get(id).filter(|a| a.id == id)
    }

    /// Assignments on one worker, ordered by start.
    pub fn assignments_for_worker(&self, worker_id: WorkerId) -> Vec<&JobAssignment> {
        let mut out: Vec<&JobAssignment> = self
            .per_job
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .collect();
        out.sort_by_key(|a| (a.start, a.id));
        out
    }

    /// Number of jobs placed during loose rounds.
    pub fn loose_placements(&self) -> usize {
        self.per_job.iter().filter(|a| a.phase.is_loose()).count()
    }

    /// Number of jobs placed by the strict sweep.
    pub fn strict_placements(&self) -> usize {
        self.per_job.len() - self.loose_placements()
    }

    /// Whether two summaries describe the same placement, ignoring wall time.
    pub fn same_plan(&self, other: &PlanSummary) -> bool {
        self.makespan == other.makespan
            && self.horizon == other.horizon
            && self.per_job == other.per_job
            && self.workers == other.workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: JobId, worker_id: WorkerId, start: Time, end: Time) -> JobAssignment {
        JobAssignment {
            id,
            worker_id,
            start,
            end,
            idle: 0,
            sequence: id,
            phase: PlacementPhase::Strict,
        }
    }

    fn sample_summary() -> PlanSummary {
        PlanSummary {
            makespan: 14,
            horizon: 26,
            wall_time: Duration::from_micros(1500),
            status: SolveStatus::Possible,
            per_job: vec![
                assignment(0, 0, 0, 5),
                assignment(1, 1, 0, 6),
                assignment(2, 0, 5, 12),
                JobAssignment {
                    phase: PlacementPhase::Loose { round: 0 },
                    ..assignment(3, 1, 6, 14)
                },
            ],
            workers: vec![],
        }
    }

    #[test]
    fn test_speedup() {
        let s = sample_summary();
        assert!((s.speedup() - 26.0 / 14.0).abs() < 1e-10);

        let empty = PlanSummary {
            makespan: 0,
            horizon: 0,
            per_job: vec![],
            ..sample_summary()
        };
        assert!((empty.speedup() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_wall_time_ms() {
        assert!((sample_summary().wall_time_ms() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_assignment_lookup() {
        let s = sample_summary();
        assert_eq!(s.assignment(2).unwrap().worker_id, 0);
        assert!(s.assignment(9).is_none());
        assert_eq!(s.assignment(3).unwrap().duration(), 8);
    }

    #[test]
    fn test_assignments_for_worker_sorted() {
        let s = sample_summary();
        let w0: Vec<JobId> = s.assignments_for_worker(0).iter().map(|a| a.id).collect();
        assert_eq!(w0, vec![0, 2]);
    }

    #[test]
    fn test_phase_counts() {
        let s = sample_summary();
        assert_eq!(s.loose_placements(), 1);
        assert_eq!(s.strict_placements(), 3);
    }

    #[test]
    fn test_overlap() {
        let a = assignment(0, 0, 0, 5);
        assert!(a.overlaps(&assignment(1, 1, 4, 6)));
        assert!(!a.overlaps(&assignment(1, 1, 5, 6)));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Possible.to_string(), "possible");
    }

    #[test]
    fn test_summary_serializes() {
        let json = serde_json::to_string(&sample_summary()).unwrap();
        assert!(json.contains("\"makespan\":14"));
        assert!(json.contains("\"Possible\""));
    }
}
