//! Greedy conflict-aware scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! [`Dispatcher`] orders the jobs, then places them in two phases:
//!
//! - **Loose rounds**: each unplaced job is offered once per round to the
//!   placement heuristic, which may decline. Declined jobs are retried in
//!   the next round.
//! - **Strict sweep**: the remaining jobs are placed unconditionally at the
//!   earliest conflict-free slot over all workers.
//!
//! Placement is irrevocable. The plan always satisfies the worker and
//! conflict invariants; it is feasible, not optimal.
//!
//! # Placement heuristics
//!
//! [`EarliestFree`] tries only the earliest-free worker. [`Scored`] tries
//! every worker and ranks them by load balance and immediate conflicts.
//! [`MinMakespan`] takes the longest jobs first and picks the worker that
//! keeps the projected makespan smallest.
//!
//! # KPI
//!
//! [`PlanKpi`] computes makespan, speedup, utilization, idle time and
//! ordering deviations.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

mod dispatcher;
mod kpi;
mod placement;
mod rounds;
mod strategy;
mod timeline;

pub use dispatcher::{solve, Dispatcher};
pub use kpi::PlanKpi;
pub use placement::{EarliestFree, MinMakespan, PlacementHeuristic, ScoreWeights, Scored};
pub use rounds::LooseRoundHeuristic;
pub use strategy::{AssignmentMode, Strategy};
pub use timeline::{CommitRecord, TimelineTracker, WorkerTimeline};
