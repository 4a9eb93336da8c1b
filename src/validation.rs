//! Input validation and plan verification.
//!
//! `validate_instance` checks the structural integrity of an instance
//! before scheduling. Detects:
//! - Job or worker ids that do not match their index
//! - Zero-duration jobs
//! - Self conflicts and conflicts with unknown jobs
//! - Asymmetric conflict sets, or sets that disagree with the pair list
//!
//! `verify_plan` checks a finished plan against the scheduling invariants:
//! full coverage, exact durations, no cross-worker conflict overlap, serial
//! workers, and makespan consistency.

use crate::models::{ConflictPair, Instance, PlanSummary};
use std::collections::BTreeSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A job's id differs from its index in the arena.
    IdMismatch,
    /// A worker's id differs from its index in the pool.
    WorkerIdMismatch,
    /// A job has zero duration.
    ZeroDuration,
    /// A job lists itself as a conflict.
    SelfConflict,
    /// A conflict references a job that doesn't exist.
    UnknownJob,
    /// `a` lists `b` as a conflict but not vice versa, or the job sets
    /// disagree with the instance's pair list.
    AsymmetricConflict,
    /// A job has no worker in the plan.
    Unassigned,
    /// `end - start` differs from the job's duration.
    DurationMismatch,
    /// Two conflicting jobs on different workers overlap in time.
    ConflictOverlap,
    /// Two jobs on the same worker overlap in time.
    WorkerOverlap,
    /// Reported makespan differs from the latest job end.
    MakespanMismatch,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structure of an instance.
///
/// Checks:
/// 1. `jobs[i].id == i` and `workers[i].id == i`
/// 2. Every duration is at least 1
/// 3. No job conflicts with itself
/// 4. Every conflict partner exists
/// 5. Conflict sets are symmetric
/// 6. Conflict sets match the instance's pair list exactly
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();
    let n = instance.jobs.len();

    for (idx, worker) in instance.workers.iter().enumerate() {
        if worker.id != idx {
            errors.push(ValidationError::new(
                ValidationErrorKind::WorkerIdMismatch,
                format!("Worker at index {idx} has id {}", worker.id),
            ));
        }
    }

    for (idx, job) in instance.jobs.iter().enumerate() {
        if job.id != idx {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("Job at index {idx} has id {}", job.id),
            ));
        }

        if job.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Job {idx} has zero duration"),
            ));
        }

        for &partner in &job.conflicts {
            if partner == idx {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfConflict,
                    format!("Job {idx} conflicts with itself"),
                ));
            } else if partner >= n {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownJob,
                    format!("Job {idx} conflicts with unknown job {partner}"),
                ));
            } else if !instance.jobs[partner].conflicts.contains(&idx) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::AsymmetricConflict,
                    format!("Job {idx} conflicts with {partner} but not vice versa"),
                ));
            }
        }
    }

    // Pair list vs. per-job sets
    let listed: BTreeSet<ConflictPair> = instance.conflicts.iter().copied().collect();
    for pair in &listed {
        if pair.high() >= n {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownJob,
                format!(
                    "Conflict ({}, {}) references unknown job {}",
                    pair.low(),
                    pair.high(),
                    pair.high()
                ),
            ));
        }
    }

    let from_jobs: BTreeSet<ConflictPair> = instance
        .jobs
        .iter()
        .flat_map(|j| j.conflicts.iter().filter_map(move |&p| ConflictPair::new(j.id, p)))
        .filter(|p| p.high() < n)
        .collect();
    for pair in from_jobs.symmetric_difference(&listed) {
        if pair.high() < n {
            errors.push(ValidationError::new(
                ValidationErrorKind::AsymmetricConflict,
                format!(
                    "Conflict ({}, {}) is not recorded consistently in the pair list and job sets",
                    pair.low(),
                    pair.high()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Verifies a finished plan against its instance.
///
/// Checks:
/// 1. Every job is assigned and `end - start == duration`
/// 2. Conflicting jobs on different workers do not overlap
/// 3. Jobs on the same worker do not overlap
/// 4. `makespan` equals the latest job end (0 if nothing ran)
pub fn verify_plan(summary: &PlanSummary, instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    for job in &instance.jobs {
        match summary.assignment(job.id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::Unassigned,
                format!("Job {} has no assignment", job.id),
            )),
            Some(a) => {
                if a.end < a.start || a.duration() != job.duration {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DurationMismatch,
                        format!(
                            "Job {} runs [{}, {}) but has duration {}",
                            job.id, a.start, a.end, job.duration
                        ),
                    ));
                }
            }
        }
    }

    for pair in &instance.conflicts {
        let (Some(a), Some(b)) = (summary.assignment(pair.low()), summary.assignment(pair.high()))
        else {
            continue;
        };
        if a.worker_id != b.worker_id && a.overlaps(b) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictOverlap,
                format!(
                    "Conflicting jobs {} [{}, {}) on worker {} and {} [{}, {}) on worker {} overlap",
                    a.id, a.start, a.end, a.worker_id, b.id, b.start, b.end, b.worker_id
                ),
            ));
        }
    }

    for worker in &instance.workers {
        let placed = summary.assignments_for_worker(worker.id);
        for pair in placed.windows(2) {
            if pair[0].end > pair[1].start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WorkerOverlap,
                    format!(
                        "Jobs {} and {} overlap on worker {}",
                        pair[0].id, pair[1].id, worker.id
                    ),
                ));
            }
        }
    }

    let latest_end = summary.per_job.iter().map(|a| a.end).max().unwrap_or(0);
    if latest_end != summary.makespan {
        errors.push(ValidationError::new(
            ValidationErrorKind::MakespanMismatch,
            format!(
                "Reported makespan {} but latest job ends at {latest_end}",
                summary.makespan
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobAssignment, PlacementPhase, SolveStatus};
    use std::time::Duration;

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    fn assignment(id: usize, worker_id: usize, start: u64, end: u64) -> JobAssignment {
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

    fn summary(makespan: u64, per_job: Vec<JobAssignment>) -> PlanSummary {
        PlanSummary {
            makespan,
            horizon: 0,
            wall_time: Duration::ZERO,
            status: SolveStatus::Possible,
            per_job,
            workers: vec![],
        }
    }

    #[test]
    fn test_valid_instance() {
        let inst = Instance::new(2, [3, 4, 5], [(0, 1), (1, 2)]);
        assert!(validate_instance(&inst).is_ok());
    }

    #[test]
    fn test_id_mismatch() {
        let mut inst = Instance::new(1, [3, 4], []);
        inst.jobs[1].id = 7;
        assert!(has_kind(validate_instance(&inst), ValidationErrorKind::IdMismatch));
    }

    #[test]
    fn test_worker_id_mismatch() {
        let mut inst = Instance::new(3, [3, 4], []);
        inst.workers[2].id = 5;
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::WorkerIdMismatch);
        assert!(errors[0].message.contains("index 2"));
    }

    #[test]
    fn test_zero_duration() {
        let inst = Instance::new(1, [0, 4], []);
        assert!(has_kind(validate_instance(&inst), ValidationErrorKind::ZeroDuration));
    }

    #[test]
    fn test_self_conflict() {
        let mut inst = Instance::new(1, [3], []);
        inst.jobs[0].conflicts.insert(0);
        assert!(has_kind(validate_instance(&inst), ValidationErrorKind::SelfConflict));
    }

    #[test]
    fn test_unknown_partner() {
        let inst = Instance::new(1, [3, 3], [(1, 5)]);
        assert!(has_kind(validate_instance(&inst), ValidationErrorKind::UnknownJob));
    }

    #[test]
    fn test_asymmetric_conflict() {
        let mut inst = Instance::new(1, [3, 3], [(0, 1)]);
        inst.jobs[1].conflicts.clear();
        assert!(has_kind(
            validate_instance(&inst),
            ValidationErrorKind::AsymmetricConflict
        ));
    }

    #[test]
    fn test_pair_list_disagreement() {
        let mut inst = Instance::new(1, [3, 3, 3], [(0, 1)]);
        inst.jobs[1].conflicts.insert(2);
        inst.jobs[2].conflicts.insert(1);
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::AsymmetricConflict);
    }

    #[test]
    fn test_multiple_errors() {
        let mut inst = Instance::new(1, [0, 3], [(0, 4)]);
        inst.jobs[1].conflicts.insert(1);
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_verify_good_plan() {
        let inst = Instance::new(2, [5, 6, 7], [(0, 2)]);
        let plan = summary(
            12,
            vec![assignment(0, 0, 0, 5), assignment(1, 1, 0, 6), assignment(2, 1, 6, 13)],
        );
        // makespan mismatch only
        let errors = verify_plan(&plan, &inst).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MakespanMismatch);

        let plan = summary(13, plan.per_job);
        assert!(verify_plan(&plan, &inst).is_ok());
    }

    #[test]
    fn test_verify_conflict_overlap() {
        let inst = Instance::new(2, [5, 5], [(0, 1)]);
        let plan = summary(7, vec![assignment(0, 0, 0, 5), assignment(1, 1, 2, 7)]);
        assert!(has_kind(verify_plan(&plan, &inst), ValidationErrorKind::ConflictOverlap));
    }

    #[test]
    fn test_verify_worker_overlap() {
        let inst = Instance::new(1, [5, 5], []);
        let plan = summary(9, vec![assignment(0, 0, 0, 5), assignment(1, 0, 4, 9)]);
        assert!(has_kind(verify_plan(&plan, &inst), ValidationErrorKind::WorkerOverlap));
    }

    #[test]
    fn test_verify_unassigned_and_duration() {
        let inst = Instance::new(1, [5, 5], []);
        let plan = summary(4, vec![assignment(0, 0, 0, 4)]);
        let errors = verify_plan(&plan, &inst).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::Unassigned));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DurationMismatch));
    }
}
