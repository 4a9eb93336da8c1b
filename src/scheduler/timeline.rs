//! Worker timeline tracker.
//!
//! Owns the job arena of one solve call together with every worker's
//! timeline. All placement goes through [`TimelineTracker::commit`], which
//! is irrevocable: nothing is ever unassigned or moved.
//!
//! # Start-time computation
//!
//! A job placed on worker `w` starts no earlier than `w.next_free_time`.
//! Conflicting partners already placed on other workers push the start
//! forward: whenever `[start, start + d)` overlaps a partner, `start`
//! jumps to the largest colliding partner end, and the scan repeats until
//! no partner overlaps. The result is the earliest slot at or after
//! `next_free_time` that clears every partner.

use std::time::Duration;

use crate::models::{
    Job, JobAssignment, JobId, PlacementPhase, PlanSummary, SolveStatus, Time, WorkerId,
    WorkerSummary,
};

/// Mutable state of one worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerTimeline {
    /// Worker id.
    pub id: WorkerId,
    /// Jobs in commit order.
    pub jobs: Vec<JobId>,
    /// End of the last committed job.
    pub next_free_time: Time,
    /// Sum of committed durations.
    pub busy_time: Time,
    /// Sum of idle gaps inserted before jobs.
    pub idle_time: Time,
}

impl WorkerTimeline {
    /// Creates an empty timeline.
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Number of committed jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    fn summary(&self) -> WorkerSummary {
        WorkerSummary {
            id: self.id,
            jobs: self.jobs.clone(),
            next_free_time: self.next_free_time,
            busy_time: self.busy_time,
            idle_time: self.idle_time,
        }
    }
}

/// Per-job bookkeeping the tracker keeps beside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRecord {
    /// Global commit order.
    pub sequence: usize,
    /// Phase that committed the job.
    pub phase: PlacementPhase,
}

/// All worker timelines plus the job arena they schedule.
#[derive(Debug, Clone)]
pub struct TimelineTracker {
    timelines: Vec<WorkerTimeline>,
    jobs: Vec<Job>,
    commits: Vec<Option<CommitRecord>>,
    committed: usize,
}

impl TimelineTracker {
    /// Creates a tracker with `worker_count` empty timelines.
    ///
    /// Scheduling fields of the given jobs are cleared so the tracker
    /// always starts from an unplaced arena.
    pub fn new(worker_count: usize, mut jobs: Vec<Job>) -> Self {
        for job in &mut jobs {
            job.reset();
        }
        let commits = vec![None; jobs.len()];
        Self {
            timelines: (0..worker_count).map(WorkerTimeline::new).collect(),
            jobs,
            commits,
            committed: 0,
        }
    }

    /// Worker timelines, by id.
    pub fn timelines(&self) -> &[WorkerTimeline] {
        &self.timelines
    }

    /// Job arena, by id.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Mutable arena, for heuristics that annotate jobs (e.g. conflict load).
    ///
    /// Scheduling fields must only be written through [`Self::commit`].
    pub fn jobs_mut(&mut self) -> &mut [Job] {
        &mut self.jobs
    }

    /// Looks up a job.
    pub fn job(&self, id: JobId) -> &Job {
        &self.jobs[id]
    }

    /// Number of workers.
    pub fn worker_count(&self) -> usize {
        self.timelines.len()
    }

    /// Whether a job has been committed.
    pub fn is_assigned(&self, id: JobId) -> bool {
        self.jobs[id].is_assigned()
    }

    /// Number of committed jobs.
    pub fn committed_count(&self) -> usize {
        self.committed
    }

    /// Whether every job has been committed.
    pub fn is_complete(&self) -> bool {
        self.committed == self.jobs.len()
    }

    /// Commit record of a job.
    pub fn commit_record(&self, id: JobId) -> Option<CommitRecord> {
        self.commits[id]
    }

    /// Worker with the smallest `next_free_time`, lowest id on ties.
    ///
    /// `None` only when the pool is empty.
    pub fn earliest_free_worker(&self) -> Option<WorkerId> {
        self.timelines
            .iter()
            .min_by_key(|t| (t.next_free_time, t.id))
            .map(|t| t.id)
    }

    /// Worker ids by `next_free_time`, lowest id on ties.
    pub fn workers_by_next_free(&self) -> Vec<WorkerId> {
        let mut order: Vec<WorkerId> = (0..self.timelines.len()).collect();
        order.sort_by_key(|&w| (self.timelines[w].next_free_time, w));
        order
    }

    /// `next_free_time` of a worker.
    pub fn next_free_time(&self, worker: WorkerId) -> Time {
        self.timelines[worker].next_free_time
    }

    /// Busy time of a worker.
    pub fn busy_time(&self, worker: WorkerId) -> Time {
        self.timelines[worker].busy_time
    }

    /// Mean busy time across workers. Zero for an empty pool.
    pub fn average_busy_time(&self) -> f64 {
        if self.timelines.is_empty() {
            return 0.0;
        }
        let total: Time = self.timelines.iter().map(|t| t.busy_time).sum();
        total as f64 / self.timelines.len() as f64
    }

    /// Earliest start on `worker` clearing every placed partner on other
    /// workers.
    pub fn conflict_adjusted_start(&self, worker: WorkerId, job: JobId) -> Time {
        self.push_past_partners(job, self.next_free_time(worker), |w| w != worker)
    }

    /// Earliest start on `worker` clearing every placed partner, whichever
    /// worker it sits on.
    pub fn strict_start(&self, worker: WorkerId, job: JobId) -> Time {
        self.push_past_partners(job, self.next_free_time(worker), |_| true)
    }

    /// Whether a partner committed on `worker` covers `start`, using the
    /// closed window `[partner.start, partner.end]`.
    ///
    /// Placing a job directly behind a conflicting partner on the same
    /// worker counts as a collision for loose placement.
    pub fn same_worker_conflict(&self, worker: WorkerId, job: JobId, start: Time) -> bool {
        self.assigned_partners(job)
            .any(|p| p.worker == Some(worker) && p.start <= start && start <= p.end)
    }

    /// Whether any conflicting partner of `job` is committed on `worker`.
    pub fn holds_partner(&self, worker: WorkerId, job: JobId) -> bool {
        self.assigned_partners(job).any(|p| p.worker == Some(worker))
    }

    /// Partners on other workers that would overlap `job` if it started at
    /// `worker`'s `next_free_time`.
    pub fn immediate_conflicts(&self, worker: WorkerId, job: JobId) -> usize {
        let start = self.next_free_time(worker);
        let duration = self.jobs[job].duration;
        self.assigned_partners(job)
            .filter(|p| p.worker != Some(worker) && p.overlaps(start, duration))
            .count()
    }

    /// Whether every conflicting partner with a smaller id is committed.
    pub fn predecessors_assigned(&self, job: JobId) -> bool {
        self.jobs[job]
            .conflicts
            .range(..job)
            .all(|&p| self.jobs[p].is_assigned())
    }

    /// Places `job` on `worker` at `start`.
    ///
    /// Appends to the worker's timeline and records `start`, `end`, and the
    /// idle gap. A start before the worker's `next_free_time` is accepted
    /// with zero idle; callers never request one.
    ///
    /// # Panics
    /// Panics if the job is already assigned or the worker does not exist.
    pub fn commit(&mut self, worker: WorkerId, job: JobId, start: Time, phase: PlacementPhase) {
        assert!(!self.jobs[job].is_assigned(), "job {job} committed twice");
        let timeline = &mut self.timelines[worker];
        let entry = &mut self.jobs[job];

        let idle = start.saturating_sub(timeline.next_free_time);
        entry.worker = Some(worker);
        entry.start = start;
        entry.end = start + entry.duration;
        entry.idle = idle;

        timeline.jobs.push(job);
        timeline.next_free_time = entry.end;
        timeline.busy_time += entry.duration;
        timeline.idle_time += idle;

        self.commits[job] = Some(CommitRecord {
            sequence: self.committed,
            phase,
        });
        self.committed += 1;
    }

    /// Latest `next_free_time` across workers, or 0.
    pub fn makespan(&self) -> Time {
        self.timelines
            .iter()
            .map(|t| t.next_free_time)
            .max()
            .unwrap_or(0)
    }

    /// Sum of all job durations.
    pub fn horizon(&self) -> Time {
        self.jobs.iter().map(|j| j.duration).sum()
    }

    /// Snapshots the worker timelines.
    pub fn worker_summaries(&self) -> Vec<WorkerSummary> {
        self.timelines.iter().map(WorkerTimeline::summary).collect()
    }

    /// Consumes the tracker into a plan summary.
    ///
    /// Unplaced jobs are left out of `per_job`; the driver only calls this
    /// once every job is committed.
    pub fn into_summary(self, wall_time: Duration) -> PlanSummary {
        let per_job = self
            .jobs
            .iter()
            .zip(&self.commits)
            .filter_map(|(job, record)| {
                let worker_id = job.worker?;
                let record = (*record)?;
                Some(JobAssignment {
                    id: job.id,
                    worker_id,
                    start: job.start,
                    end: job.end,
                    idle: job.idle,
                    sequence: record.sequence,
                    phase: record.phase,
                })
            })
            .collect();

        PlanSummary {
            makespan: self.makespan(),
            horizon: self.horizon(),
            wall_time,
            status: SolveStatus::Possible,
            per_job,
            workers: self.worker_summaries(),
        }
    }

    fn assigned_partners(&self, job: JobId) -> impl Iterator<Item = &Job> + '_ {
        self.jobs[job]
            .conflicts
            .iter()
            .map(|&p| &self.jobs[p])
            .filter(|p| p.is_assigned())
    }

    fn push_past_partners(
        &self,
        job: JobId,
        from: Time,
        considered: impl Fn(WorkerId) -> bool,
    ) -> Time {
        let duration = self.jobs[job].duration;
        let mut start = from;
        loop {
            let next = self
                .assigned_partners(job)
                .filter(|p| p.worker.is_some_and(&considered) && p.overlaps(start, duration))
                .map(|p| p.end)
                .fold(start, Time::max);
            if next == start {
                return start;
            }
            start = next;
        }
    }
}
