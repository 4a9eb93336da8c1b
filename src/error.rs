//! Error types.
//!
//! Every variant is a configuration or input error, detected before any
//! placement is made. A loose placement that declines is not an error; it
//! is reported as `false` and retried in the next round.

use thiserror::Error;

use crate::models::Time;
use crate::validation::ValidationError;

/// Failure of instance generation or of a solve call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Duration bounds are inverted, or allow a zero-length job.
    #[error("invalid duration range [{min}, {max}]: require 1 <= min <= max")]
    InvalidRange { min: Time, max: Time },

    /// Conflict percentage outside `0..=100`.
    #[error("conflict percentage {0} is outside 0..=100")]
    InvalidPercentage(u32),

    /// Assignment mode code with no matching variant.
    #[error("unsupported assignment mode code {0}")]
    UnsupportedAssignmentMode(u8),

    /// Ordering heuristic code with no matching variant.
    #[error("unknown job ordering code {0}")]
    UnknownOrdering(u8),

    /// Loose-round heuristic code with no matching variant.
    #[error("unknown loose-round heuristic code {0}")]
    UnknownRoundHeuristic(u8),

    /// The instance has no workers.
    #[error("no workers available")]
    NoWorkersAvailable,

    /// The instance failed structural validation.
    #[error("invalid instance: {}", summarize(.0))]
    InvalidInstance(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (+{} more)", first.message, rest.len()),
    }
}
