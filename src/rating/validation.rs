use super::condition::Condition;
use super::error::RatingError;

/// Validate conditions before any arithmetic.
/// Stops at the first offending condition. An empty list is valid.
/// Duplicate names are allowed.
pub fn validate_conditions(conditions: &[Condition]) -> Result<(), RatingError> {
    for (index, condition) in conditions.iter().enumerate() {
        if !(0..=100).contains(&condition.percentage) {
            return Err(RatingError::OutOfRange {
                name: condition.name.clone(),
                percentage: condition.percentage,
            });
        }
        if condition.name.trim().is_empty() {
            return Err(RatingError::EmptyName { index });
        }
    }
    Ok(())
}
