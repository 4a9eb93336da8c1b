//! Benchmark experiment rows.
//!
//! An [`ExperimentParams`] row describes one generate-and-solve run; running
//! it yields an [`ExperimentRecord`] with the row's inputs and the measured
//! outputs. Both serialize with `serde`, so sweeps can be stored as JSON
//! lines or CSV by the caller.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::error::ScheduleError;
use crate::generator::BenchmarkConfig;
use crate::models::{Instance, PlanSummary, SolveStatus, Time};
use crate::scheduler::{Dispatcher, PlanKpi, Strategy};

/// Placement heuristic an experiment row is solved with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverKind {
    /// [`Dispatcher::simple`].
    #[default]
    EarliestFree,
    /// [`Dispatcher::scored`].
    Scored,
    /// [`Dispatcher::min_makespan`].
    MinMakespan,
}

impl SolverKind {
    /// All solvers.
    pub const ALL: [SolverKind; 3] = [Self::EarliestFree, Self::Scored, Self::MinMakespan];

    /// Solves `instance` with the selected dispatcher.
    pub fn solve(
        self,
        instance: &Instance,
        strategy: &Strategy,
    ) -> Result<PlanSummary, ScheduleError> {
        match self {
            Self::EarliestFree => Dispatcher::simple().solve(instance, strategy),
            Self::Scored => Dispatcher::scored().solve(instance, strategy),
            Self::MinMakespan => Dispatcher::min_makespan().solve(instance, strategy),
        }
    }
}

/// One experiment input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentParams {
    /// Row number.
    pub no: u32,
    /// Group the row belongs to.
    pub group_no: u32,
    /// Generator seed.
    pub seed: u64,
    /// Solver thread count. Recorded only; solving is single-threaded.
    pub solver_threads: u32,
    /// Loose-phase budget in seconds. 0 = unbounded.
    pub time_budget_secs: u64,
    /// Number of jobs.
    pub job_count: usize,
    /// Minimum job duration.
    pub duration_min: Time,
    /// Maximum job duration.
    pub duration_max: Time,
    /// Number of workers.
    pub worker_count: usize,
    /// Conflict percentage (0..=100).
    pub conflict_percentage: u32,
    /// Opaque weight carried to the output.
    pub time_weight: u32,
    /// Job ordering code (1..=5).
    pub ordering_code: u8,
    /// Loose rounds; 0 selects the strict sweep.
    pub loose_rounds: u32,
    /// Placement heuristic.
    #[serde(default)]
    pub solver: SolverKind,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        let config = BenchmarkConfig::default();
        let strategy = Strategy::default();
        Self {
            no: 1,
            group_no: 1,
            seed: config.seed,
            solver_threads: 1,
            time_budget_secs: 0,
            job_count: config.job_count,
            duration_min: config.duration_min,
            duration_max: config.duration_max,
            worker_count: config.worker_count,
            conflict_percentage: config.conflict_percentage,
            time_weight: config.time_weight,
            ordering_code: strategy.ordering.code(),
            loose_rounds: strategy.loose_rounds,
            solver: SolverKind::default(),
        }
    }
}

impl ExperimentParams {
    /// Generator configuration for this row.
    pub fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig::new(self.seed)
            .with_jobs(self.job_count)
            .with_duration_range(self.duration_min, self.duration_max)
            .with_workers(self.worker_count)
            .with_conflict_percentage(self.conflict_percentage)
            .with_time_weight(self.time_weight)
    }

    /// Solve strategy for this row.
    pub fn strategy(&self) -> Result<Strategy, ScheduleError> {
        let strategy = Strategy::from_codes(self.ordering_code, self.loose_rounds)?;
        Ok(match self.time_budget_secs {
            0 => strategy,
            secs => strategy.with_time_budget(Duration::from_secs(secs)),
        })
    }

    /// Generates the instance and solves it with the row's solver.
    pub fn run(&self) -> Result<ExperimentRecord, ScheduleError> {
        let strategy = self.strategy()?;
        let instance = self.benchmark_config().generate()?;
        let plan = self.solver.solve(&instance, &strategy)?;

        let wall_time_ms = plan.wall_time_ms();
        let record = ExperimentRecord {
            params: self.clone(),
            loose_rounds_used: strategy.effective_loose_rounds(),
            wall_time_ms,
            parallel_time_sum: wall_time_ms + plan.makespan as f64,
            makespan: plan.makespan,
            horizon: plan.horizon,
            status: plan.status,
            speedup: plan.speedup(),
        };
        info!(
            no = self.no,
            group = self.group_no,
            solver = ?self.solver,
            makespan = record.makespan,
            speedup = record.speedup,
            "experiment finished"
        );
        Ok(record)
    }
}

/// Runs every row in order, stopping at the first error.
pub fn run_all(rows: &[ExperimentParams]) -> Result<Vec<ExperimentRecord>, ScheduleError> {
    rows.iter().map(ExperimentParams::run).collect()
}

/// Inputs and measured outputs of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// The input row.
    #[serde(flatten)]
    pub params: ExperimentParams,
    /// Loose rounds the driver was allowed to run.
    pub loose_rounds_used: u32,
    /// Solver wall time in milliseconds.
    pub wall_time_ms: f64,
    /// `wall_time_ms + makespan`.
    pub parallel_time_sum: f64,
    /// Plan makespan.
    pub makespan: Time,
    /// Sum of durations.
    pub horizon: Time,
    /// Solve status.
    pub status: SolveStatus,
    /// `horizon / makespan`.
    pub speedup: f64,
}

/// Earliest-free vs. scored placement on one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicComparison {
    /// KPIs with earliest-free placement.
    pub simple: PlanKpi,
    /// KPIs with scored placement.
    pub scored: PlanKpi,
    /// Relative speedup gain of scored over earliest-free, in percent.
    pub improvement_pct: f64,
}

/// Solves `instance` with both placement heuristics.
pub fn compare_heuristics(
    instance: &Instance,
    strategy: &Strategy,
) -> Result<HeuristicComparison, ScheduleError> {
    let simple_plan = Dispatcher::simple().solve(instance, strategy)?;
    let scored_plan = Dispatcher::scored().solve(instance, strategy)?;
    let simple = PlanKpi::calculate(&simple_plan, instance);
    let scored = PlanKpi::calculate(&scored_plan, instance);

    let improvement_pct = if simple.speedup > 0.0 {
        (scored.speedup - simple.speedup) / simple.speedup * 100.0
    } else {
        0.0
    };

    Ok(HeuristicComparison {
        simple,
        scored,
        improvement_pct,
    })
}
