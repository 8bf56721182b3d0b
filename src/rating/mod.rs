pub mod bilateral;
pub mod combine;
pub mod condition;
pub mod engine;
pub mod error;
pub mod validation;

pub use bilateral::{
    apply_bilateral_factor, detect_bilateral_groups, BilateralAdjustment, BilateralGroupSummary,
    BilateralGroups, BILATERAL_FACTOR,
};
pub use combine::{combine, format_percent, Combination, RatingStep};
pub use condition::{Condition, ExtremityGroup, RatedCondition, Side, SyntheticBilateralCondition};
pub use engine::{calculate_combined_rating, round_to_nearest_ten, CombinedRatingResult};
pub use error::RatingError;
pub use validation::validate_conditions;
