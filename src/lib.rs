//! Conflict-aware parallel job scheduling.
//!
//! Places a set of fixed-duration jobs on a pool of identical workers so
//! that no two conflicting jobs run at the same time, while keeping the
//! makespan small. Scheduling is a fast greedy heuristic: a feasible plan
//! is always produced, optimality is not sought.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `Worker`, `ConflictPair`,
//!   `Instance`, `PlanSummary`
//! - **`generator`**: Reproducible synthetic benchmark instances
//! - **`dispatching`**: Job ordering heuristics (FIFO, MCCF, MCDF, LCCF, LCDF)
//! - **`scheduler`**: Loose/strict placement driver, placement heuristics, KPIs
//! - **`validation`**: Instance integrity checks and plan verification
//! - **`experiment`**: Experiment rows and heuristic comparison
//!
//! # Example
//!
//! ```
//! use u_conflict::{generate_instance, solve};
//! use u_conflict::scheduler::Strategy;
//! use u_conflict::validation::verify_plan;
//!
//! let instance = generate_instance(42, 200, 5, 10, 8, 5).unwrap();
//! let plan = solve(&instance, &Strategy::default()).unwrap();
//! assert!(verify_plan(&plan, &instance).is_ok());
//! assert!(plan.speedup() > 1.0);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
//! - Baker (1996), "Mutual exclusion scheduling", Theoretical Computer
//!   Science 162(2)

pub mod dispatching;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
pub use generator::generate_instance;
pub use scheduler::solve;
