use thiserror::Error;

/// Errors produced by the rating engine.
///
/// `OutOfRange` and `EmptyName` are caller input errors, detected before any
/// arithmetic runs. `InvariantViolation` means the engine itself misbehaved and
/// is never produced by bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("condition '{name}': percentage {percentage} is outside 0-100")]
    OutOfRange { name: String, percentage: i32 },

    #[error("condition #{index}: name must not be empty")]
    EmptyName { index: usize },

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl RatingError {
    /// True for errors caused by the caller's input rather than an engine defect.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RatingError::OutOfRange { .. } | RatingError::EmptyName { .. }
        )
    }

    /// Name of the offending input field, if this is an input error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RatingError::OutOfRange { .. } => Some("percentage"),
            RatingError::EmptyName { .. } => Some("name"),
            RatingError::InvariantViolation(_) => None,
        }
    }
}
