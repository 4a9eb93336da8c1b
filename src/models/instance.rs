//! Benchmark instance.
//!
//! An instance bundles the worker pool, the job arena and the conflict
//! graph, together with the experiment metadata that travels with it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ConflictPair, Job, JobId, Time, Worker};

/// A scheduling problem: workers, jobs, and pairwise conflicts.
///
/// `jobs[i].id == i` for every job. Conflict pairs are kept sorted and
/// deduplicated, and each pair is mirrored into both endpoints' conflict
/// sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Worker pool.
    pub workers: Vec<Worker>,
    /// Job arena, indexed by job id.
    pub jobs: Vec<Job>,
    /// Conflict pairs, ascending.
    pub conflicts: Vec<ConflictPair>,
    /// Percentage of all possible pairs that conflict (0..=100).
    pub conflict_percentage: u32,
    /// Opaque weight carried through to experiment output.
    pub time_weight: u32,
    /// `true` = jobs may be reordered freely (proposer);
    /// `false` = order among conflicting jobs is preserved (attestor).
    pub proposer_mode: bool,
}

impl Instance {
    /// Builds an instance from job durations and conflict pairs.
    ///
    /// Self-pairs are dropped and duplicates merged. Pairs whose endpoints
    /// fall outside the job arena are kept in `conflicts` (so validation can
    /// report them) but are not mirrored into any job.
    pub fn new(
        worker_count: usize,
        durations: impl IntoIterator<Item = Time>,
        pairs: impl IntoIterator<Item = (JobId, JobId)>,
    ) -> Self {
        let jobs: Vec<Job> = durations
            .into_iter()
            .enumerate()
            .map(|(id, duration)| Job::new(id, duration))
            .collect();

        let conflicts: BTreeSet<ConflictPair> = pairs
            .into_iter()
            .filter_map(|(a, b)| ConflictPair::new(a, b))
            .collect();

        let mut instance = Self {
            workers: Worker::pool(worker_count),
            jobs,
            conflicts: conflicts.into_iter().collect(),
            conflict_percentage: 0,
            time_weight: 0,
            proposer_mode: true,
        };
        instance.mirror_conflicts();
        instance
    }

    /// Sets the recorded conflict percentage.
    pub fn with_conflict_percentage(mut self, percentage: u32) -> Self {
        self.conflict_percentage = percentage;
        self
    }

    /// Sets the pass-through time weight.
    pub fn with_time_weight(mut self, weight: u32) -> Self {
        self.time_weight = weight;
        self
    }

    /// Sets the operating mode.
    pub fn with_proposer_mode(mut self, proposer_mode: bool) -> Self {
        self.proposer_mode = proposer_mode;
        self
    }

    /// Switches to order-preserving (attestor) mode.
    pub fn as_attestor(self) -> Self {
        self.with_proposer_mode(false)
    }

    /// Number of workers.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Number of jobs.
    #[inline]
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Looks up a job by id.
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// Sum of all durations: the fully serial completion time.
    pub fn horizon(&self) -> Time {
        self.jobs.iter().map(|j| j.duration).sum()
    }

    /// Whether jobs `a` and `b` conflict.
    pub fn is_conflict(&self, a: JobId, b: JobId) -> bool {
        self.jobs.get(a).is_some_and(|j| j.conflicts_with(b))
    }

    /// Fraction of possible pairs realized, in percent.
    pub fn realized_density(&self) -> f64 {
        let total = super::total_pairs(self.job_count());
        if total == 0 {
            0.0
        } else {
            self.conflicts.len() as f64 * 100.0 / total as f64
        }
    }

    fn mirror_conflicts(&mut self) {
        let n = self.jobs.len();
        for pair in &self.conflicts {
            if pair.high() < n {
                self.jobs[pair.low()].conflicts.insert(pair.high());
                self.jobs[pair.high()].conflicts.insert(pair.low());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_mirrors_conflicts() {
        let inst = Instance::new(2, [3, 4, 5], [(2, 0), (0, 2), (1, 1)]);
        assert_eq!(inst.worker_count(), 2);
        assert_eq!(inst.job_count(), 3);
        assert_eq!(inst.conflicts.len(), 1);
        assert!(inst.is_conflict(0, 2));
        assert!(inst.is_conflict(2, 0));
        assert!(!inst.is_conflict(1, 1));
        assert!(!inst.jobs[1].has_conflicts());
    }

    #[test]
    fn test_instance_horizon() {
        let inst = Instance::new(2, [5, 6, 7, 8], []);
        assert_eq!(inst.horizon(), 26);
    }

    #[test]
    fn test_out_of_range_pair_kept_but_not_mirrored() {
        let inst = Instance::new(1, [1, 1], [(0, 9)]);
        assert_eq!(inst.conflicts.len(), 1);
        assert!(!inst.jobs[0].has_conflicts());
    }

    #[test]
    fn test_builders() {
        let inst = Instance::new(1, [1], [])
            .with_conflict_percentage(20)
            .with_time_weight(100)
            .as_attestor();
        assert_eq!(inst.conflict_percentage, 20);
        assert_eq!(inst.time_weight, 100);
        assert!(!inst.proposer_mode);
    }

    #[test]
    fn test_realized_density() {
        let inst = Instance::new(1, [1, 1, 1, 1], [(0, 1), (2, 3), (1, 3)]);
        // 3 of 6 pairs
        assert!((inst.realized_density() - 50.0).abs() < 1e-10);
        assert!((Instance::new(1, [1], []).realized_density() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_serde_roundtrip() {
        let inst = Instance::new(2, [3, 4], [(0, 1)]).with_time_weight(7);
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
