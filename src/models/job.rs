//! Job model.
//!
//! A job is an indivisible unit of work with a fixed duration. Jobs are
//! stored in an arena indexed by their id, and conflicts refer to partners
//! by id rather than by reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable job identifier. Equal to the job's index in the instance arena.
pub type JobId = usize;

/// Stable worker identifier. Equal to the worker's index in the pool.
pub type WorkerId = usize;

/// Time instant or length, in abstract time units.
pub type Time = u64;

/// A job to be scheduled.
///
/// The fixed part (`id`, `duration`, `conflicts`) is populated once when the
/// instance is built. The scheduling part (`worker`, `start`, `end`, `idle`)
/// is written exactly once by the timeline tracker when the job is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Processing time.
    pub duration: Time,
    /// Ids of conflicting jobs. Ordered so iteration is deterministic.
    pub conflicts: BTreeSet<JobId>,
    /// Assigned worker. `None` until placed.
    pub worker: Option<WorkerId>,
    /// Start time. Meaningful only once `worker` is set.
    pub start: Time,
    /// End time (`start + duration`).
    pub end: Time,
    /// Gap left on the worker right before this job.
    pub idle: Time,
    /// Overlap potential with still-unplaced partners.
    ///
    /// Only valid right after [`Job::refresh_conflict_load`]; it depends on
    /// which partners are assigned at that moment.
    #[serde(default)]
    pub conflict_load: Time,
}

impl Job {
    /// Creates an unplaced job without conflicts.
    pub fn new(id: JobId, duration: Time) -> Self {
        Self {
            id,
            duration,
            conflicts: BTreeSet::new(),
            worker: None,
            start: 0,
            end: 0,
            idle: 0,
            conflict_load: 0,
        }
    }

    /// Adds conflicting partners.
    pub fn with_conflicts(mut self, partners: impl IntoIterator<Item = JobId>) -> Self {
        self.conflicts.extend(partners);
        self
    }

    /// Whether the job has been placed on a worker.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.worker.is_some()
    }

    /// Number of conflicting partners.
    #[inline]
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Whether the job conflicts with any other job.
    #[inline]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Whether this job conflicts with `other`.
    #[inline]
    pub fn conflicts_with(&self, other: JobId) -> bool {
        self.conflicts.contains(&other)
    }

    /// Whether `[start, start + duration)` intersects this job's interval.
    ///
    /// Always `false` for an unplaced job.
    #[inline]
    pub fn overlaps(&self, start: Time, duration: Time) -> bool {
        self.is_assigned() && start < self.end && start + duration > self.start
    }

    /// Recomputes `conflict_load` against the current arena.
    ///
    /// Sums `min(duration, partner.duration)` over partners that are not yet
    /// assigned.
    pub fn refresh_conflict_load(&mut self, arena: &[Job]) {
        self.conflict_load = self.conflict_load_in(arena);
    }

    /// Computes the conflict load against `arena` without storing it.
    pub fn conflict_load_in(&self, arena: &[Job]) -> Time {
        self.conflicts
            .iter()
            .filter_map(|&p| arena.get(p))
            .filter(|partner| !partner.is_assigned())
            .map(|partner| self.duration.min(partner.duration))
            .sum()
    }

    /// Sums `min(duration, partner.duration)` over every partner, placed
    /// or not.
    pub fn total_conflict_duration_in(&self, arena: &[Job]) -> Time {
        self.conflicts
            .iter()
            .filter_map(|&p| arena.get(p))
            .map(|partner| self.duration.min(partner.duration))
            .sum()
    }

    /// Clears all scheduling outputs.
    pub fn reset(&mut self) {
        self.worker = None;
        self.start = 0;
        self.end = 0;
        self.idle = 0;
        self.conflict_load = 0;
    }
}

/// A worker in the pool. Workers are identical and carry only an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: WorkerId,
}

impl Worker {
    /// Creates a worker.
    pub fn new(id: WorkerId) -> Self {
        Self { id }
    }

    /// Creates `count` workers with ids `0..count`.
    pub fn pool(count: usize) -> Vec<Self> {
        (0..count).map(Self::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(3, 7).with_conflicts([5, 1, 5]);
        assert_eq!(job.id, 3);
        assert_eq!(job.duration, 7);
        assert_eq!(job.conflict_count(), 2);
        assert!(job.conflicts_with(1));
        assert!(!job.conflicts_with(3));
        assert!(!job.is_assigned());
        assert_eq!(job.conflicts.iter().copied().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_overlaps_requires_assignment() {
        let mut job = Job::new(0, 5);
        job.start = 0;
        job.end = 5;
        assert!(!job.overlaps(2, 1));

        job.worker = Some(0);
        assert!(job.overlaps(2, 1));
        assert!(job.overlaps(0, 5));
        // Half-open intervals: touching is not overlapping
        assert!(!job.overlaps(5, 3));
        assert!(!job.overlaps(10, 3));
        assert!(job.overlaps(4, 3));
    }

    #[test]
    fn test_refresh_conflict_load_counts_unassigned_only() {
        let mut arena = vec![
            Job::new(0, 10).with_conflicts([1, 2]),
            Job::new(1, 4).with_conflicts([0]),
            Job::new(2, 20).with_conflicts([0]),
        ];

        let mut job = arena[0].clone();
        job.refresh_conflict_load(&arena);
        // min(10,4) + min(10,20)
        assert_eq!(job.conflict_load, 14);

        arena[2].worker = Some(0);
        job.refresh_conflict_load(&arena);
        assert_eq!(job.conflict_load, 4);
    }

    #[test]
    fn test_total_conflict_duration_ignores_assignment() {
        let mut arena = vec![
            Job::new(0, 10).with_conflicts([1, 2]),
            Job::new(1, 4).with_conflicts([0]),
            Job::new(2, 20).with_conflicts([0]),
        ];
        assert_eq!(arena[0].total_conflict_duration_in(&arena), 14);
        arena[2].worker = Some(0);
        assert_eq!(arena[0].total_conflict_duration_in(&arena), 14);
        assert_eq!(arena[1].total_conflict_duration_in(&arena), 4);
    }

    #[test]
    fn test_reset() {
        let mut job = Job::new(0, 5);
        job.worker = Some(1);
        job.start = 3;
        job.end = 8;
        job.idle = 3;
        job.reset();
        assert!(!job.is_assigned());
        assert_eq!((job.start, job.end, job.idle), (0, 0, 0));
    }

    #[test]
    fn test_worker_pool() {
        let pool = Worker::pool(3);
        assert_eq!(pool, vec![Worker::new(0), Worker::new(1), Worker::new(2)]);
        assert!(Worker::pool(0).is_empty());
    }
}
