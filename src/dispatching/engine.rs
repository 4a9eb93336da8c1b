//! Ordering engine.
//!
//! Produces the placement order for a job arena: either a heuristic sort
//! (proposer mode) or the order-preserving partition (attestor mode).

use super::{JobOrdering, OrderingRule};
use crate::models::{Job, JobId};

/// Sorts jobs with one ordering rule.
///
/// Sorting is stable, so jobs with equal scores keep their id order and
/// the result is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct OrderingEngine {
    ordering: JobOrdering,
}

impl OrderingEngine {
    /// Creates an engine for the given ordering.
    pub fn new(ordering: JobOrdering) -> Self {
        Self { ordering }
    }

    /// The configured ordering.
    pub fn ordering(&self) -> JobOrdering {
        self.ordering
    }

    /// Returns job ids in placement order.
    ///
    /// Recomputes `conflict_load` on every job first when the rule reads it,
    /// which is why the arena is borrowed mutably.
    pub fn sort(&self, jobs: &mut [Job]) -> Vec<JobId> {
        let rule = self.ordering.rule();
        if rule.needs_conflict_load() {
            refresh_conflict_loads(jobs);
        }

        let mut order: Vec<JobId> = jobs.iter().map(|j| j.id).collect();
        sort_by_rule(&mut order, jobs, rule);
        order
    }

    /// Order-preserving attestor order.
    ///
    /// Jobs with at least one conflict come first, in id order, followed by
    /// conflict-free jobs in id order. Conflicting jobs are never reordered
    /// relative to each other.
    pub fn attestor_order(jobs: &[Job]) -> Vec<JobId> {
        let (conflicting, free): (Vec<&Job>, Vec<&Job>) =
            jobs.iter().partition(|j| j.has_conflicts());
        let mut order: Vec<JobId> = conflicting.iter().map(|j| j.id).collect();
        order.sort_unstable();
        let mut tail: Vec<JobId> = free.iter().map(|j| j.id).collect();
        tail.sort_unstable();
        order.extend(tail);
        order
    }
}

impl Default for OrderingEngine {
    fn default() -> Self {
        Self::new(JobOrdering::default())
    }
}

/// Recomputes `conflict_load` for every job against the arena as it is now.
pub fn refresh_conflict_loads(jobs: &mut [Job]) {
    let arena: &[Job] = jobs;
    let loads: Vec<_> = arena.iter().map(|j| j.conflict_load_in(arena)).collect();
    for (job, load) in jobs.iter_mut().zip(loads) {
        job.conflict_load = load;
    }
}

fn sort_by_rule(order: &mut [JobId], jobs: &[Job], rule: &dyn OrderingRule) {
    let scores: Vec<f64> = jobs.iter().map(|j| rule.evaluate(j)).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Instance;

    // Job 0: no conflicts, d=4
    // Job 1: conflicts {2, 3}, d=10
    // Job 2: conflicts {1}, d=2
    // Job 3: conflicts {1}, d=6
    fn sample_jobs() -> Vec<Job> {
        Instance::new(2, [4, 10, 2, 6], [(1, 2), (1, 3)]).jobs
    }

    #[test]
    fn test_fifo_keeps_order() {
        let mut jobs = sample_jobs();
        let order = OrderingEngine::new(JobOrdering::Fifo).sort(&mut jobs);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_mccf_stable_on_ties() {
        let mut jobs = sample_jobs();
        let order = OrderingEngine::new(JobOrdering::MostConflictCountFirst).sort(&mut jobs);
        // 1 has two partners; 2 and 3 tie with one and keep id order.
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_lccf() {
        let mut jobs = sample_jobs();
        let order = OrderingEngine::new(JobOrdering::LeastConflictCountFirst).sort(&mut jobs);
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_mcdf_refreshes_load() {
        let mut jobs = sample_jobs();
        let order = OrderingEngine::new(JobOrdering::MostConflictDurationFirst).sort(&mut jobs);
        // loads: 0 → 0, 1 → min(10,2)+min(10,6) = 8, 2 → 2, 3 → 6
        assert_eq!(jobs[1].conflict_load, 8);
        assert_eq!(jobs[3].conflict_load, 6);
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_lcdf_ignores_assigned_partners() {
        let mut jobs = sample_jobs();
        jobs[3].worker = Some(0);
        let order = OrderingEngine::new(JobOrdering::LeastConflictDurationFirst).sort(&mut jobs);
        // loads: 0 → 0, 1 → 2, 2 → 2, 3 → 6
        assert_eq!(jobs[1].conflict_load, 2);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_attestor_order() {
        let jobs = Instance::new(2, [1, 1, 1, 1, 1], [(3, 1)]).jobs;
        assert_eq!(OrderingEngine::attestor_order(&jobs), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_empty() {
        let mut jobs: Vec<Job> = Vec::new();
        assert!(OrderingEngine::default().sort(&mut jobs).is_empty());
        assert!(OrderingEngine::attestor_order(&jobs).is_empty());
    }
}
