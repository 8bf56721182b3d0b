use serde::Serialize;

use super::bilateral::{apply_bilateral_factor, detect_bilateral_groups, BilateralGroupSummary};
use super::combine::{combine, RatingStep};
use super::condition::{Condition, RatedCondition};
use super::error::RatingError;
use super::validation::validate_conditions;

/// Slack allowed for floating point noise when checking the [0, 100] invariant.
const RANGE_TOLERANCE: f64 = 1e-9;

/// Final output of a rating calculation.
///
/// Built fresh on every call; nothing here refers back to earlier calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRatingResult {
    /// Combined rating rounded to two decimals.
    pub true_combined_rating: f64,
    /// VA rating: a multiple of 10 in 0..=100.
    pub rounded_combined_rating: u32,
    pub bilateral_applied: bool,
    /// Rendered audit trail, bilateral sub-passes first.
    pub steps: Vec<String>,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bilateral_groups: Vec<BilateralGroupSummary>,
    #[serde(skip)]
    pub rating_steps: Vec<RatingStep>,
}

impl CombinedRatingResult {
    fn empty() -> Self {
        Self {
            true_combined_rating: 0.0,
            rounded_combined_rating: 0,
            bilateral_applied: false,
            steps: Vec::new(),
            notes: vec!["No conditions provided".to_string()],
            bilateral_groups: Vec::new(),
            rating_steps: Vec::new(),
        }
    }
}

/// Calculate the combined disability rating for a list of conditions.
///
/// Validates first and rejects the whole batch on the first bad condition.
/// When `bilateral` is false no pairing happens, even if pairs exist.
pub fn calculate_combined_rating(
    conditions: &[Condition],
    bilateral: bool,
) -> Result<CombinedRatingResult, RatingError> {
    validate_conditions(conditions)?;

    if conditions.is_empty() {
        return Ok(CombinedRatingResult::empty());
    }

    let mut rating_steps = Vec::new();
    let mut notes = Vec::new();
    let mut bilateral_groups = Vec::new();

    let groups = if bilateral {
        detect_bilateral_groups(conditions)
    } else {
        Default::default()
    };
    let bilateral_applied = !groups.is_empty();

    let final_pool: Vec<RatedCondition> = if bilateral_applied {
        let adjustment = apply_bilateral_factor(conditions, &groups);
        notes.push(format!(
            "Bilateral factor (38 CFR 4.26) applied to {} group(s): each group's combined rating was increased by 10% before the final combination",
            adjustment.groups.len()
        ));
        notes.extend(adjustment.notes);
        rating_steps.extend(adjustment.steps);
        bilateral_groups = adjustment.groups;
        adjustment.adjusted
    } else {
        conditions.iter().cloned().map(RatedCondition::User).collect()
    };

    let pass = combine(&final_pool);
    rating_steps.extend(pass.steps);

    if !(-RANGE_TOLERANCE..=100.0 + RANGE_TOLERANCE).contains(&pass.combined) {
        return Err(RatingError::InvariantViolation(format!(
            "combined rating {} is outside 0-100",
            pass.combined
        )));
    }

    let hundredths = to_hundredths(pass.combined);
    let true_combined_rating = hundredths as f64 / 100.0;
    let rounded_combined_rating = round_hundredths_to_ten(hundredths);

    tracing::info!(
        "{} condition(s): combined {:.2}% -> rated {}%{}",
        conditions.len(),
        true_combined_rating,
        rounded_combined_rating,
        if bilateral_applied { " (bilateral)" } else { "" }
    );

    Ok(CombinedRatingResult {
        true_combined_rating,
        rounded_combined_rating,
        bilateral_applied,
        steps: rating_steps.iter().map(|s| s.description.clone()).collect(),
        notes,
        bilateral_groups,
        rating_steps,
    })
}

/// Round a combined rating to the nearest multiple of 10.
///
/// The value is first taken to two decimals, then the tens digit is rounded
/// half up on integer hundredths: 24.99 -> 20, 25.00 -> 30, 35 -> 40.
/// Never rounds half to even.
pub fn round_to_nearest_ten(value: f64) -> u32 {
    round_hundredths_to_ten(to_hundredths(value))
}

fn to_hundredths(value: f64) -> u64 {
    (value * 100.0).round().max(0.0) as u64
}

fn round_hundredths_to_ten(hundredths: u64) -> u32 {
    // 1000 hundredths = 10 percentage points
    let tens = (hundredths + 500) / 1000;
    (tens * 10).min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{ExtremityGroup, Side};

    #[test]
    fn test_empty_input() {
        let result = calculate_combined_rating(&[], true).unwrap();
        assert_eq!(result.true_combined_rating, 0.0);
        assert_eq!(result.rounded_combined_rating, 0);
        assert!(!result.bilateral_applied);
        assert!(result.steps.is_empty());
        assert_eq!(result.notes, vec!["No conditions provided".to_string()]);
    }

    #[test]
    fn test_single_condition() {
        let result = calculate_combined_rating(&[Condition::new("Back", 40)], true).unwrap();
        assert_eq!(result.true_combined_rating, 40.0);
        assert_eq!(result.rounded_combined_rating, 40);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_three_conditions() {
        let conditions = vec![
            Condition::new("Knee", 30),
            Condition::new("Back", 20),
            Condition::new("Tinnitus", 10),
        ];
        let result = calculate_combined_rating(&conditions, true).unwrap();
        assert_eq!(result.true_combined_rating, 49.6);
        assert_eq!(result.rounded_combined_rating, 50);
        assert_eq!(result.steps.len(), 3);
    }

    #[test]
    fn test_bilateral_pair() {
        let conditions = vec![
            Condition::sided("Left knee", 30, Side::Left, ExtremityGroup::Leg),
            Condition::sided("Right knee", 30, Side::Right, ExtremityGroup::Leg),
        ];
        let result = calculate_combined_rating(&conditions, true).unwrap();
        assert!(result.bilateral_applied);
        assert_eq!(result.true_combined_rating, 56.1);
        assert_eq!(result.rounded_combined_rating, 60);
        // two sub-pass steps, then the synthetic condition in the final pass
        assert_eq!(result.steps.len(), 3);
        assert!(result.steps[2].starts_with("Bilateral LEG (incl. factor): 56.1% of 100% remaining"));
        assert_eq!(result.notes.len(), 2);
        assert!(result.notes[0].contains("Bilateral factor"));
        assert_eq!(result.bilateral_groups.len(), 1);
    }

    #[test]
    fn test_bilateral_disabled() {
        let conditions = vec![
            Condition::sided("Left knee", 30, Side::Left, ExtremityGroup::Leg),
            Condition::sided("Right knee", 30, Side::Right, ExtremityGroup::Leg),
        ];
        let result = calculate_combined_rating(&conditions, false).unwrap();
        assert!(!result.bilateral_applied);
        assert_eq!(result.true_combined_rating, 51.0);
        assert_eq!(result.rounded_combined_rating, 50);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_unpaired_side_is_ordinary() {
        let conditions = vec![
            Condition::sided("Left knee", 30, Side::Left, ExtremityGroup::Leg),
            Condition::new("Back", 20),
        ];
        let result = calculate_combined_rating(&conditions, true).unwrap();
        assert!(!result.bilateral_applied);
        assert_eq!(result.true_combined_rating, 44.0);
    }

    #[test]
    fn test_validation_failure_returns_no_result() {
        let conditions = vec![Condition::new("Back", 20), Condition::new("Knee", 150)];
        let err = calculate_combined_rating(&conditions, true).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_rounding_tens_boundary() {
        assert_eq!(round_to_nearest_ten(24.99), 20);
        assert_eq!(round_to_nearest_ten(25.0), 30);
        assert_eq!(round_to_nearest_ten(35.0), 40);
        assert_eq!(round_to_nearest_ten(44.6), 40);
        assert_eq!(round_to_nearest_ten(45.0), 50);
        assert_eq!(round_to_nearest_ten(0.0), 0);
        assert_eq!(round_to_nearest_ten(4.99), 0);
        assert_eq!(round_to_nearest_ten(95.0), 100);
        assert_eq!(round_to_nearest_ten(100.0), 100);
    }

    #[test]
    fn test_rounding_uses_two_decimal_value() {
        // 24.996 displays as 25.00 and is rated from that
        assert_eq!(round_to_nearest_ten(24.996), 30);
        assert_eq!(round_to_nearest_ten(24.994), 20);
    }

    #[test]
    fn test_rating_steps_match_rendered_steps() {
        let conditions = vec![Condition::new("A", 50), Condition::new("B", 50)];
        let result = calculate_combined_rating(&conditions, true).unwrap();
        assert_eq!(result.rating_steps.len(), result.steps.len());
        assert_eq!(result.rating_steps[1].running_total, 75.0);
        assert_eq!(result.steps[1], result.rating_steps[1].description);
    }
}
