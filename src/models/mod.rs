//! Scheduling domain models.
//!
//! Provides the data types for conflict-aware parallel scheduling problems
//! and their solutions.
//!
//! # Domain Mappings
//!
//! | u-conflict | Blockchain execution | Batch computing |
//! |------------|---------------------|-----------------|
//! | Job | Transaction | Task |
//! | Worker | Execution core | Machine / slot |
//! | Conflict | Read/write set overlap | Shared lock |
//! | Instance | Block | Batch |
//! | PlanSummary | Parallel execution plan | Dispatch plan |

mod conflict;
mod instance;
mod job;
mod plan;

pub use conflict::{total_pairs, ConflictPair};
pub use instance::Instance;
pub use job::{Job, JobId, Time, Worker, WorkerId};
pub use plan::{JobAssignment, PlacementPhase, PlanSummary, SolveStatus, WorkerSummary};
