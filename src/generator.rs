//! Reproducible benchmark instance generator.
//!
//! Builds a worker pool, jobs with uniformly sampled durations, and a
//! conflict graph of a target density. Output is a pure function of the
//! seed and parameters, which is what makes comparative experiments
//! meaningful.
//!
//! # Algorithm
//!
//! 1. Sample each duration i.i.d. from `[min, max]`.
//! 2. Target pair count = `floor(n(n-1)/2 * p / 100)`.
//! 3. Draw `(a, b)` uniformly from a second generator seeded with the same
//!    seed, rejecting self-pairs and duplicates, until the target is hit.
//! 4. Canonicalize, sort ascending, mirror into both endpoints.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

use crate::error::ScheduleError;
use crate::models::{total_pairs, ConflictPair, Instance, Time};

/// Parameters of a synthetic benchmark.
///
/// # Example
///
/// ```
/// use u_conflict::generator::BenchmarkConfig;
///
/// let instance = BenchmarkConfig::new(42)
///     .with_jobs(100)
///     .with_duration_range(5, 10)
///     .with_workers(8)
///     .with_conflict_percentage(10)
///     .generate()
///     .unwrap();
/// assert_eq!(instance.job_count(), 100);
/// assert_eq!(instance.conflicts.len(), 495);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Random seed.
    pub seed: u64,
    /// Number of jobs.
    pub job_count: usize,
    /// Minimum job duration (inclusive).
    pub duration_min: Time,
    /// Maximum job duration (inclusive).
    pub duration_max: Time,
    /// Number of workers.
    pub worker_count: usize,
    /// Conflict density in percent of all possible pairs.
    pub conflict_percentage: u32,
    /// Pass-through weight recorded on the instance.
    pub time_weight: u32,
    /// Operating mode recorded on the instance.
    pub proposer_mode: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            job_count: 100,
            duration_min: 5,
            duration_max: 10,
            worker_count: 4,
            conflict_percentage: 0,
            time_weight: 100,
            proposer_mode: true,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a default configuration with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Sets the number of jobs.
    pub fn with_jobs(mut self, job_count: usize) -> Self {
        self.job_count = job_count;
        self
    }

    /// Sets the inclusive duration range.
    pub fn with_duration_range(mut self, min: Time, max: Time) -> Self {
        self.duration_min = min;
        self.duration_max = max;
        self
    }

    /// Sets the number of workers.
    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Sets the share of possible pairs that conflict, in percent.
    pub fn with_conflict_percentage(mut self, percentage: u32) -> Self {
        self.conflict_percentage = percentage;
        self
    }

    /// Sets the weight carried to the instance.
    pub fn with_time_weight(mut self, weight: u32) -> Self {
        self.time_weight = weight;
        self
    }

    /// Sets proposer (`true`) or attestor (`false`) mode.
    pub fn with_proposer_mode(mut self, proposer_mode: bool) -> Self {
        self.proposer_mode = proposer_mode;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.duration_min == 0 || self.duration_min > self.duration_max {
            return Err(ScheduleError::InvalidRange {
                min: self.duration_min,
                max: self.duration_max,
            });
        }
        if self.conflict_percentage > 100 {
            return Err(ScheduleError::InvalidPercentage(self.conflict_percentage));
        }
        Ok(())
    }

    /// Number of conflict pairs the generated instance will contain.
    pub fn target_conflicts(&self) -> usize {
        let target = total_pairs(self.job_count) as u128 * self.conflict_percentage as u128 / 100;
        target as usize
    }

    /// Generates the instance.
    pub fn generate(&self) -> Result<Instance, ScheduleError> {
        self.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let durations: Vec<Time> = (0..self.job_count)
            .map(|_| rng.random_range(self.duration_min..=self.duration_max))
            .collect();

        let pairs = self.sample_conflicts();

        Ok(Instance::new(
            self.worker_count,
            durations,
            pairs.iter().map(|p| (p.low(), p.high())),
        )
        .with_conflict_percentage(self.conflict_percentage)
        .with_time_weight(self.time_weight)
        .with_proposer_mode(self.proposer_mode))
    }

    fn sample_conflicts(&self) -> BTreeSet<ConflictPair> {
        let target = self.target_conflicts();
        let mut pairs = BTreeSet::new();
        if target == 0 {
            return pairs;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.job_count;
        while pairs.len() < target {
            let a = rng.random_range(0..n);
            let b = rng.random_range(0..n);
            if let Some(pair) = ConflictPair::new(a, b) {
                pairs.insert(pair);
            }
        }
        pairs
    }
}

/// Generates a benchmark instance in proposer mode.
///
/// Fails with [`ScheduleError::InvalidRange`] when `duration_min >
/// duration_max`, and also when `duration_min == 0` since every job must
/// end after it starts. Fails with
/// [`ScheduleError::InvalidPercentage`] when `conflict_percentage > 100`.
pub fn generate_instance(
    seed: u64,
    job_count: usize,
    duration_min: Time,
    duration_max: Time,
    worker_count: usize,
    conflict_percentage: u32,
) -> Result<Instance, ScheduleError> {
    BenchmarkConfig::new(seed)
        .with_jobs(job_count)
        .with_duration_range(duration_min, duration_max)
        .with_workers(worker_count)
        .with_conflict_percentage(conflict_percentage)
        .generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_instance;

    #[test]
    fn test_reproducible() {
        let a = generate_instance(7, 50, 5, 10, 4, 20).unwrap();
        let b = generate_instance(7, 50, 5, 10, 4, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = generate_instance(1, 50, 1, 1000, 4, 20).unwrap();
        let b = generate_instance(2, 50, 1, 1000, 4, 20).unwrap();
        assert_ne!(a.jobs, b.jobs);
    }

    #[test]
    fn test_durations_in_range() {
        let inst = generate_instance(3, 200, 5, 10, 4, 0).unwrap();
        assert!(inst.jobs.iter().all(|j| (5..=10).contains(&j.duration)));
        assert!(inst.jobs.iter().enumerate().all(|(i, j)| j.id == i));
    }

    #[test]
    fn test_fixed_duration() {
        let inst = generate_instance(3, 10, 7, 7, 2, 0).unwrap();
        assert!(inst.jobs.iter().all(|j| j.duration == 7));
    }

    #[test]
    fn test_conflict_count_matches_density() {
        // 20 jobs → 190 pairs; 25% → 47
        let inst = generate_instance(11, 20, 1, 5, 3, 25).unwrap();
        assert_eq!(inst.conflicts.len(), 47);
        assert_eq!(inst.conflict_percentage, 25);

        let full = generate_instance(11, 10, 1, 5, 3, 100).unwrap();
        assert_eq!(full.conflicts.len(), 45);
        assert!(full.jobs.iter().all(|j| j.conflict_count() == 9));
    }

    #[test]
    fn test_conflicts_sorted_and_mirrored() {
        let inst = generate_instance(5, 30, 1, 5, 3, 30).unwrap();
        assert!(inst.conflicts.windows(2).all(|w| w[0] < w[1]));
        for pair in &inst.conflicts {
            assert!(pair.low() < pair.high());
            assert!(inst.jobs[pair.low()].conflicts_with(pair.high()));
            assert!(inst.jobs[pair.high()].conflicts_with(pair.low()));
        }
        assert!(validate_instance(&inst).is_ok());
    }

    #[test]
    fn test_zero_conflicts() {
        let inst = generate_instance(5, 30, 1, 5, 3, 0).unwrap();
        assert!(inst.conflicts.is_empty());
        assert!(inst.jobs.iter().all(|j| !j.has_conflicts()));
    }

    #[test]
    fn test_tiny_instances() {
        let empty = generate_instance(5, 0, 1, 5, 3, 50).unwrap();
        assert_eq!(empty.job_count(), 0);
        let single = generate_instance(5, 1, 1, 5, 3, 100).unwrap();
        assert!(single.conflicts.is_empty());
    }

    #[test]
    fn test_invalid_range() {
        assert_eq!(
            generate_instance(1, 10, 9, 3, 2, 0),
            Err(ScheduleError::InvalidRange { min: 9, max: 3 })
        );
        assert!(matches!(
            generate_instance(1, 10, 0, 3, 2, 0),
            Err(ScheduleError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_invalid_percentage() {
        assert_eq!(
            generate_instance(1, 10, 1, 3, 2, 101),
            Err(ScheduleError::InvalidPercentage(101))
        );
    }

    #[test]
    fn test_config_metadata() {
        let inst = BenchmarkConfig::new(9)
            .with_jobs(5)
            .with_time_weight(60)
            .with_proposer_mode(false)
            .generate()
            .unwrap();
        assert_eq!(inst.time_weight, 60);
        assert!(!inst.proposer_mode);
        assert_eq!(inst.worker_count(), 4);
    }
}
