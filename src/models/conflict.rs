//! Conflict relation between jobs.
//!
//! Two conflicting jobs may never run concurrently on different workers.
//! The relation is symmetric, so pairs are stored canonically with the
//! smaller id first; derived equality, hashing and ordering then treat
//! `(i, j)` and `(j, i)` as the same pair.

use serde::{Deserialize, Serialize};

use super::JobId;

/// An unordered pair of distinct conflicting jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictPair {
    low: JobId,
    high: JobId,
}

impl ConflictPair {
    /// Creates a canonical pair. Returns `None` for a self-pair.
    pub fn new(a: JobId, b: JobId) -> Option<Self> {
        if a == b {
            return None;
        }
        Some(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    /// Smaller job id.
    #[inline]
    pub fn low(&self) -> JobId {
        self.low
    }

    /// Larger job id.
    #[inline]
    pub fn high(&self) -> JobId {
        self.high
    }

    /// Whether `job` is one of the endpoints.
    #[inline]
    pub fn contains(&self, job: JobId) -> bool {
        self.low == job || self.high == job
    }

    /// The endpoint opposite to `job`, if `job` is an endpoint.
    pub fn partner_of(&self, job: JobId) -> Option<JobId> {
        if job == self.low {
            Some(self.high)
        } else if job == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

/// Number of distinct unordered pairs among `job_count` jobs.
#[inline]
pub fn total_pairs(job_count: usize) -> u64 {
    let n = job_count as u64;
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_is_canonical() {
        let a = ConflictPair::new(7, 2).unwrap();
        let b = ConflictPair::new(2, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.low(), 2);
        assert_eq!(a.high(), 7);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_self_pair_rejected() {
        assert!(ConflictPair::new(4, 4).is_none());
    }

    #[test]
    fn test_pair_ordering() {
        let mut pairs = vec![
            ConflictPair::new(3, 1).unwrap(),
            ConflictPair::new(0, 5).unwrap(),
            ConflictPair::new(1, 2).unwrap(),
        ];
        pairs.sort();
        let flat: Vec<_> = pairs.iter().map(|p| (p.low(), p.high())).collect();
        assert_eq!(flat, vec![(0, 5), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_partner_of() {
        let p = ConflictPair::new(1, 9).unwrap();
        assert!(p.contains(9));
        assert_eq!(p.partner_of(1), Some(9));
        assert_eq!(p.partner_of(9), Some(1));
        assert_eq!(p.partner_of(4), None);
    }

    #[test]
    fn test_total_pairs() {
        assert_eq!(total_pairs(0), 0);
        assert_eq!(total_pairs(1), 0);
        assert_eq!(total_pairs(2), 1);
        assert_eq!(total_pairs(10), 45);
    }
}
