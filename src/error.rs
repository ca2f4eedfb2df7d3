//! Crate-wide error types for the scheduling core.

use thiserror::Error;

/// Errors surfaced by the scheduling core.
///
/// `BudgetExhausted` is intentionally not a variant here: running out of
/// time or solution budget is not an error, it is represented by returning
/// fewer schedules than requested.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `TimeBitmap::from_span` was given a time that isn't a recognized
    /// slot boundary.
    #[error("unrecognized time boundary: {0}")]
    UnknownTimeBoundary(String),

    /// `TimeBitmap::from_span` was given an unrecognized weekday name.
    #[error("unrecognized day: {0}")]
    UnknownDay(String),

    /// A course had zero surviving tuples after enumeration and filtering.
    #[error("no valid section combinations found for {0}")]
    NoValidCombinationsFor(String),

    /// `Solver` was constructed from an unrecognized solver kind string.
    #[error("invalid solver kind: {0}")]
    InvalidSolverKind(String),

    /// The `SectionStore` or enrollment-info oracle failed.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] anyhow::Error),

    /// A request named more course codes than the cap allows.
    #[error("too many courses requested: {0} exceeds the cap of {1}")]
    TooManyCourses(usize, usize),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
