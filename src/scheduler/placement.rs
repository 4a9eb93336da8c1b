//! Placement heuristics.
//!
//! A heuristic decides where one job goes. The driver calls
//! [`PlacementHeuristic::place_loose`] during loose rounds, where declining
//! is allowed, and [`PlacementHeuristic::place_strict`] in the final sweep,
//! where it is not.
//!
//! | Heuristic | Loose candidates | Choice |
//! |-----------|------------------|--------|
//! | [`EarliestFree`] | earliest-free worker only | that worker |
//! | [`Scored`] | every worker | best load/conflict score |
//! | [`MinMakespan`] | workers holding no partner | smallest projected makespan |
//!
//! [`EarliestFree`] and [`Scored`] share the default strict placement: the
//! worker minimizing the conflict-adjusted finish time.
//!
//! In proposer mode a heuristic may also reorder the unplaced jobs before
//! each loose round ([`PlacementHeuristic::reorder_pending`]).

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::timeline::TimelineTracker;
use crate::error::ScheduleError;
use crate::models::{JobId, PlacementPhase, Time, WorkerId};

/// Chooses a worker and start time for one job.
pub trait PlacementHeuristic: std::fmt::Debug {
    /// Heuristic name, for logs and reports.
    fn name(&self) -> &'static str;

    /// Tries to place `job` during loose round `round`.
    ///
    /// Returns `false` without touching the tracker when no candidate
    /// worker is acceptable. The job is retried in the next round.
    fn place_loose(&self, tracker: &mut TimelineTracker, job: JobId, round: u32) -> bool;

    /// Reorders the unplaced jobs at the start of a loose round.
    ///
    /// Only called in proposer mode. The default keeps the order.
    fn reorder_pending(&self, _tracker: &TimelineTracker, _pending: &mut [JobId]) {}

    /// Places `job` unconditionally.
    ///
    /// Every worker is a candidate; the start is pushed past every
    /// overlapping placed partner on any worker, and the worker with the
    /// smallest resulting end wins (lowest id on ties).
    ///
    /// # Errors
    /// [`ScheduleError::NoWorkersAvailable`] for an empty pool.
    fn place_strict(&self, tracker: &mut TimelineTracker, job: JobId) -> Result<(), ScheduleError> {
        let duration = tracker.job(job).duration;
        let (worker, start) = (0..tracker.worker_count())
            .map(|w| (w, tracker.strict_start(w, job)))
            .min_by_key(|&(w, start)| (start + duration, w))
            .ok_or(ScheduleError::NoWorkersAvailable)?;

        trace!(job, worker, start, "strict placement");
        tracker.commit(worker, job, start, PlacementPhase::Strict);
        Ok(())
    }
}

/// Loose placement on the earliest-free worker only.
///
/// The start is pushed past placed partners on other workers. The job is
/// declined when a partner on the same worker covers the adjusted start.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestFree;

impl PlacementHeuristic for EarliestFree {
    fn name(&self) -> &'static str {
        "earliest-free"
    }

    fn place_loose(&self, tracker: &mut TimelineTracker, job: JobId, round: u32) -> bool {
        let Some(worker) = tracker.earliest_free_worker() else {
            return false;
        };
        let start = tracker.conflict_adjusted_start(worker, job);
        if tracker.same_worker_conflict(worker, job, start) {
            trace!(job, worker, start, "loose placement declined");
            return false;
        }
        tracker.commit(worker, job, start, PlacementPhase::Loose { round });
        true
    }
}

/// Weights of the scored heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the load-balance term.
    pub load: f64,
    /// Weight of the immediate-conflict term.
    pub conflict: f64,
}

impl ScoreWeights {
    /// Creates weights.
    pub fn new(load: f64, conflict: f64) -> Self {
        Self { load, conflict }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            load: 0.3,
            conflict: 0.7,
        }
    }
}

/// Penalty per partner that would overlap at the worker's next free time.
const CONFLICT_PENALTY: f64 = 100.0;

/// Loose placement over every worker, ranked by a weighted score.
///
/// ```text
/// score(w) = load · (−|busy(w) − avg_busy|) + conflict · (−100 · immediate(w))
/// ```
///
/// `immediate(w)` counts placed partners on other workers that would
/// overlap the job if it started at `w`'s next free time. Workers where a
/// same-worker partner covers the adjusted start are skipped. The highest
/// score wins; ties go to the lowest worker id.
///
/// Before every loose round the unplaced jobs are re-sorted by
/// [`Scored::priority`], largest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scored {
    weights: ScoreWeights,
}

impl Scored {
    /// Creates the heuristic with default weights (0.3 / 0.7).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The configured weights.
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score of placing `job` on `worker` in the tracker's current state.
    pub fn score(&self, tracker: &TimelineTracker, worker: WorkerId, job: JobId) -> f64 {
        let balance = -(tracker.busy_time(worker) as f64 - tracker.average_busy_time()).abs();
        let conflicts = tracker.immediate_conflicts(worker, job) as f64;
        self.weights.load * balance + self.weights.conflict * (-CONFLICT_PENALTY * conflicts)
    }

    /// Round priority of `job`: its total conflict duration plus its own
    /// duration.
    pub fn priority(&self, tracker: &TimelineTracker, job: JobId) -> Time {
        let entry = tracker.job(job);
        entry.total_conflict_duration_in(tracker.jobs()) + entry.duration
    }
}

impl PlacementHeuristic for Scored {
    fn name(&self) -> &'static str {
        "scored"
    }

    fn place_loose(&self, tracker: &mut TimelineTracker, job: JobId, round: u32) -> bool {
        let mut best: Option<(WorkerId, Time, f64)> = None;

        for worker in 0..tracker.worker_count() {
            let start = tracker.conflict_adjusted_start(worker, job);
            if tracker.same_worker_conflict(worker, job, start) {
                continue;
            }
            let score = self.score(tracker, worker, job);
            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((worker, start, score));
            }
        }

        match best {
            Some((worker, start, score)) => {
                trace!(job, worker, start, score, "scored placement");
                tracker.commit(worker, job, start, PlacementPhase::Loose { round });
                true
            }
            None => false,
        }
    }

    fn reorder_pending(&self, tracker: &TimelineTracker, pending: &mut [JobId]) {
        pending.sort_by_key(|&job| Reverse(self.priority(tracker, job)));
    }
}

/// Longest job first, on the worker that keeps the makespan smallest.
///
/// Workers are scanned by `next_free_time`. In loose rounds a worker
/// already holding a conflicting partner is skipped; otherwise the start is
/// pushed past partners on other workers and the candidate is ranked by
///
/// ```text
/// projected(w) = max(start(w) + d, makespan)
/// ```
///
/// The first worker with the smallest projection wins, so ties go to the
/// earliest-free one. Strict placement ranks every worker the same way,
/// pushing past partners on all of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMakespan;

impl MinMakespan {
    fn best_worker(
        tracker: &TimelineTracker,
        job: JobId,
        candidate: impl Fn(WorkerId) -> Option<Time>,
    ) -> Option<(WorkerId, Time)> {
        let duration = tracker.job(job).duration;
        let makespan = tracker.makespan();
        tracker
            .workers_by_next_free()
            .into_iter()
            .filter_map(|w| candidate(w).map(|start| (w, start)))
            .min_by_key(|&(_, start)| (start + duration).max(makespan))
    }
}

impl PlacementHeuristic for MinMakespan {
    fn name(&self) -> &'static str {
        "min-makespan"
    }

    fn place_loose(&self, tracker: &mut TimelineTracker, job: JobId, round: u32) -> bool {
        let best = Self::best_worker(tracker, job, |w| {
            (!tracker.holds_partner(w, job)).then(|| tracker.conflict_adjusted_start(w, job))
        });
        match best {
            Some((worker, start)) => {
                trace!(job, worker, start, "min-makespan placement");
                tracker.commit(worker, job, start, PlacementPhase::Loose { round });
                true
            }
            None => false,
        }
    }

    fn reorder_pending(&self, tracker: &TimelineTracker, pending: &mut [JobId]) {
        pending.sort_by_key(|&job| Reverse(tracker.job(job).duration));
    }

    fn place_strict(&self, tracker: &mut TimelineTracker, job: JobId) -> Result<(), ScheduleError> {
        let (worker, start) =
            Self::best_worker(tracker, job, |w| Some(tracker.strict_start(w, job)))
                .ok_or(ScheduleError::NoWorkersAvailable)?;

        trace!(job, worker, start, "strict placement");
        tracker.commit(worker, job, start, PlacementPhase::Strict);
        Ok(())
    }
}
