//! Built-in ordering rules.
//!
//! # Categories
//!
//! - **Identity**: FIFO
//! - **Conflict count**: MCCF, LCCF
//! - **Conflict duration**: MCDF, LCDF
//!
//! Count rules read a static property of the conflict graph. Duration
//! rules read `conflict_load`, which only counts partners that are still
//! unplaced, so it is recomputed before every sort that uses it.
//!
//! # Score Convention
//! All rules return lower scores for jobs that should be placed first.

use super::{OrderingRule, RuleScore};
use crate::models::Job;

/// First In, First Out.
///
/// Scores every job equally; the stable sort leaves the order untouched.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl OrderingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, _job: &Job) -> RuleScore {
        0.0
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Most Conflicting Count First.
///
/// Jobs with many partners are hardest to fit later, so they go first.
#[derive(Debug, Clone, Copy)]
pub struct Mccf;

impl OrderingRule for Mccf {
    fn name(&self) -> &'static str {
        "MCCF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        -(job.conflict_count() as f64)
    }

    fn description(&self) -> &'static str {
        "Most Conflicting Count First"
    }
}

/// Least Conflicting Count First.
#[derive(Debug, Clone, Copy)]
pub struct Lccf;

impl OrderingRule for Lccf {
    fn name(&self) -> &'static str {
        "LCCF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.conflict_count() as f64
    }

    fn description(&self) -> &'static str {
        "Least Conflicting Count First"
    }
}

/// Most Conflicting Duration First.
///
/// Weighs each unplaced partner by the time the two jobs could overlap,
/// `min(d_a, d_b)`.
#[derive(Debug, Clone, Copy)]
pub struct Mcdf;

impl OrderingRule for Mcdf {
    fn name(&self) -> &'static str {
        "MCDF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        -(job.conflict_load as f64)
    }

    fn needs_conflict_load(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Most Conflicting Duration First"
    }
}

/// Least Conflicting Duration First.
#[derive(Debug, Clone, Copy)]
pub struct Lcdf;

impl OrderingRule for Lcdf {
    fn name(&self) -> &'static str {
        "LCDF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.conflict_load as f64
    }

    fn needs_conflict_load(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Least Conflicting Duration First"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_with_conflicts(id: usize, duration: u64, partners: &[usize]) -> Job {
        Job::new(id, duration).with_conflicts(partners.iter().copied())
    }

    #[test]
    fn test_fifo_constant() {
        let a = job_with_conflicts(0, 5, &[1, 2]);
        let b = job_with_conflicts(1, 9, &[]);
        assert_eq!(Fifo.evaluate(&a), Fifo.evaluate(&b));
        assert!(!Fifo.needs_conflict_load());
    }

    #[test]
    fn test_count_rules() {
        let busy = job_with_conflicts(0, 5, &[1, 2, 3]);
        let quiet = job_with_conflicts(1, 5, &[0]);
        assert!(Mccf.evaluate(&busy) < Mccf.evaluate(&quiet));
        assert!(Lccf.evaluate(&busy) > Lccf.evaluate(&quiet));
        assert!(!Mccf.needs_conflict_load());
    }

    #[test]
    fn test_duration_rules() {
        let mut heavy = Job::new(0, 5);
        heavy.conflict_load = 40;
        let mut light = Job::new(1, 5);
        light.conflict_load = 3;
        assert!(Mcdf.evaluate(&heavy) < Mcdf.evaluate(&light));
        assert!(Lcdf.evaluate(&heavy) > Lcdf.evaluate(&light));
        assert!(Mcdf.needs_conflict_load());
        assert!(Lcdf.needs_conflict_load());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Mcdf.description(), "Most Conflicting Duration First");
        assert_eq!(Lccf.name(), "LCCF");
    }
}
