//! Error types for plan decoding and entity validation.

use thiserror::Error;

/// Errors that can occur while decoding or navigating a plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The raw tree cannot be turned into a plan (no partial result is returned).
    #[error("Malformed plan: {0}")]
    Malformed(String),

    #[error("Day not found: {0}")]
    DayNotFound(String),

    #[error("Muscle group not found: {0}")]
    MuscleGroupNotFound(String),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised when a mutation would break an entity invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Weight must be greater than zero, got {0}")]
    NonPositiveWeight(f64),

    #[error("Timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),

    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),

    #[error("Plan duration must be at least one week")]
    ZeroDuration,

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Position {index} out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
}
