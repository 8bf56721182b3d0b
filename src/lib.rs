//! VA combined disability rating engine.
//!
//! Turns individual disability percentages into a combined rating using the
//! remaining-efficiency formula, applies the bilateral factor to paired
//! extremity conditions, and rounds to the nearest 10 with an audit trail.
//!
//! ```
//! use va_rating::rating::{calculate_combined_rating, Condition};
//!
//! let conditions = vec![Condition::new("Back", 50), Condition::new("Knee", 50)];
//! let result = calculate_combined_rating(&conditions, true).unwrap();
//! assert_eq!(result.true_combined_rating, 75.0);
//! assert_eq!(result.rounded_combined_rating, 80);
//! ```

pub mod config;
pub mod input;
pub mod output;
pub mod rating;
