//! Plan quality metrics (KPIs).
//!
//! Computes scheduling performance indicators from a completed plan and
//! the instance it was solved for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Horizon | Sum of durations (single-worker makespan) |
//! | Speedup | Horizon / makespan |
//! | Utilization | Busy time / makespan, per worker |
//! | Total Idle | Sum of gaps inserted before jobs |
//! | Order Deviations | Conflicting pairs placed against id order |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::models::{Instance, PlanSummary, Time};

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanKpi {
    /// Latest completion time.
    pub makespan: Time,
    /// Sum of all durations.
    pub horizon: Time,
    /// `horizon / makespan`, 0 for an empty plan.
    pub speedup: f64,
    /// Per-worker utilization (0.0..=1.0), by worker id.
    pub utilization_by_worker: Vec<f64>,
    /// Mean of `utilization_by_worker`.
    pub avg_utilization: f64,
    /// Sum of idle gaps across workers.
    pub total_idle: Time,
    /// Largest per-worker busy time (lower bound on makespan).
    pub max_busy: Time,
    /// Workers that received at least one job.
    pub used_workers: usize,
    /// Jobs placed during loose rounds.
    pub loose_placements: usize,
    /// Jobs placed by the strict sweep.
    pub strict_placements: usize,
    /// Conflicting pairs whose larger id was committed first.
    ///
    /// In attestor mode only the strict sweep can produce these.
    pub order_deviations: usize,
}

impl PlanKpi {
    /// Computes KPIs from a plan and its instance.
    pub fn calculate(plan: &PlanSummary, instance: &Instance) -> Self {
        let makespan = plan.makespan;

        let utilization_by_worker: Vec<f64> = plan
            .workers
            .iter()
            .map(|w| {
                if makespan == 0 {
                    0.0
                } else {
                    w.busy_time as f64 / makespan as f64
                }
            })
            .collect();
        let avg_utilization = if utilization_by_worker.is_empty() {
            0.0
        } else {
            utilization_by_worker.iter().sum::<f64>() / utilization_by_worker.len() as f64
        };

        let order_deviations = instance
            .conflicts
            .iter()
            .filter(|pair| {
                match (plan.assignment(pair.low()), plan.assignment(pair.high())) {
                    (Some(low), Some(high)) => high.sequence < low.sequence,
                    _ => false,
                }
            })
            .count();

        Self {
            makespan,
            horizon: plan.horizon,
            speedup: plan.speedup(),
            utilization_by_worker,
            avg_utilization,
            total_idle: plan.workers.iter().map(|w| w.idle_time).sum(),
            max_busy: plan.workers.iter().map(|w| w.busy_time).max().unwrap_or(0),
            used_workers: plan.workers.iter().filter(|w| !w.jobs.is_empty()).count(),
            loose_placements: plan.loose_placements(),
            strict_placements: plan.strict_placements(),
            order_deviations,
        }
    }

    /// Whether the plan reaches the given speedup with no order deviation.
    pub fn meets_thresholds(&self, min_speedup: f64) -> bool {
        self.speedup >= min_speedup && self.order_deviations == 0
    }
}
