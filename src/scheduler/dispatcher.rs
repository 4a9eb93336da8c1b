//! Scheduling driver.
//!
//! # Algorithm
//!
//! 1. Reject empty worker pools and malformed instances.
//! 2. Order the jobs: heuristic sort in proposer mode, the
//!    order-preserving partition in attestor mode.
//! 3. Run up to `loose_rounds` loose rounds over the unplaced jobs, in
//!    order. In proposer mode the heuristic may reorder them first
//!    ([`PlacementHeuristic::reorder_pending`]). A round that places
//!    everything, or nothing, ends the loose phase early; so does an
//!    exceeded time budget.
//! 4. Place the remaining jobs with the strict sweep, in the same order.
//!
//! In attestor mode a job is offered to a loose round only once every
//! conflicting partner with a smaller id is placed. The strict sweep does
//! not repeat that check; [`PlanKpi::order_deviations`] counts how often
//! this lets a partner be placed out of order.
//!
//! # Complexity
//! O(r · n · (w + c)) where r = loose rounds, n = jobs, w = workers,
//! c = conflicts per job.
//!
//! [`PlanKpi::order_deviations`]: super::PlanKpi::order_deviations

use std::time::Instant;

use tracing::{debug, info, warn};

use super::placement::{EarliestFree, MinMakespan, PlacementHeuristic, Scored};
use super::strategy::Strategy;
use super::timeline::TimelineTracker;
use crate::dispatching::OrderingEngine;
use crate::error::ScheduleError;
use crate::models::{Instance, JobId, PlanSummary};
use crate::validation::validate_instance;

/// Greedy driver parameterized by a placement heuristic.
///
/// # Example
///
/// ```
/// use u_conflict::models::Instance;
/// use u_conflict::scheduler::{Dispatcher, Strategy};
/// use u_conflict::dispatching::JobOrdering;
///
/// let instance = Instance::new(2, [5, 6, 7, 8], []);
/// let plan = Dispatcher::simple()
///     .solve(&instance, &Strategy::strict(JobOrdering::Fifo))
///     .unwrap();
/// assert_eq!(plan.makespan, 14);
/// assert_eq!(plan.horizon, 26);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<H = EarliestFree> {
    heuristic: H,
}

impl Dispatcher<EarliestFree> {
    /// Driver with earliest-free loose placement.
    pub fn simple() -> Self {
        Self::with_heuristic(EarliestFree)
    }
}

impl Dispatcher<Scored> {
    /// Driver with scored loose placement and default weights.
    pub fn scored() -> Self {
        Self::with_heuristic(Scored::new())
    }
}

impl Dispatcher<MinMakespan> {
    /// Driver placing the longest jobs first where they keep the makespan
    /// smallest.
    pub fn min_makespan() -> Self {
        Self::with_heuristic(MinMakespan)
    }
}

impl<H: PlacementHeuristic> Dispatcher<H> {
    /// Driver with a custom placement heuristic.
    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }

    /// The placement heuristic.
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Schedules every job of `instance`.
    ///
    /// The instance is not modified; scheduling works on a copy of its
    /// job arena.
    ///
    /// # Errors
    /// - [`ScheduleError::NoWorkersAvailable`] for an empty worker pool.
    /// - [`ScheduleError::InvalidInstance`] when the instance fails
    ///   [`validate_instance`].
    pub fn solve(
        &self,
        instance: &Instance,
        strategy: &Strategy,
    ) -> Result<PlanSummary, ScheduleError> {
        let started = Instant::now();

        if instance.worker_count() == 0 {
            return Err(ScheduleError::NoWorkersAvailable);
        }
        validate_instance(instance).map_err(ScheduleError::InvalidInstance)?;

        let proposer = instance.proposer_mode;
        let rounds = strategy.effective_loose_rounds();
        let mode = if proposer { "proposer" } else { "attestor" };
        debug!(
            jobs = instance.job_count(),
            workers = instance.worker_count(),
            conflicts = instance.conflicts.len(),
            mode,
            ordering = %strategy.ordering,
            rounds,
            heuristic = self.heuristic.name(),
            "solve started"
        );

        let mut tracker = TimelineTracker::new(instance.worker_count(), instance.jobs.clone());
        let mut pending: Vec<JobId> = if proposer {
            OrderingEngine::new(strategy.ordering).sort(tracker.jobs_mut())
        } else {
            OrderingEngine::attestor_order(tracker.jobs())
        };

        for round in 0..rounds {
            if pending.is_empty() {
                break;
            }
            if let Some(budget) = strategy.time_budget {
                if started.elapsed() >= budget {
                    warn!(
                        round,
                        remaining = pending.len(),
                        budget_ms = budget.as_millis() as u64,
                        "time budget exceeded, skipping to strict sweep"
                    );
                    break;
                }
            }

            if proposer {
                self.heuristic.reorder_pending(&tracker, &mut pending);
            }
            let before = pending.len();
            pending.retain(|&job| {
                if !proposer && !tracker.predecessors_assigned(job) {
                    return true;
                }
                !self.heuristic.place_loose(&mut tracker, job, round)
            });
            let placed = before - pending.len();
            debug!(round, placed, remaining = pending.len(), "loose round");

            if placed == 0 {
                break;
            }
        }

        for &job in &pending {
            self.heuristic.place_strict(&mut tracker, job)?;
        }

        let plan = tracker.into_summary(started.elapsed());
        info!(
            makespan = plan.makespan,
            horizon = plan.horizon,
            speedup = plan.speedup(),
            loose = plan.loose_placements(),
            strict = plan.strict_placements(),
            elapsed_ms = plan.wall_time_ms(),
            "solve finished"
        );
        Ok(plan)
    }
}

/// Schedules `instance` with earliest-free loose placement.
///
/// Shorthand for `Dispatcher::simple().solve(instance, strategy)`.
pub fn solve(instance: &Instance, strategy: &Strategy) -> Result<PlanSummary, ScheduleError> {
    Dispatcher::simple().solve(instance, strategy)
}
