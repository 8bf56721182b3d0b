use serde::Serialize;

use super::condition::{RatedCondition, Side};

/// One application of the remaining-efficiency formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStep {
    pub description: String,       // rendered audit line, see `render_step`
    pub remaining_efficiency: f64, // 100 - combined, before this step
    pub condition_percentage: f64, // percentage consumed (may be synthetic)
    pub increment: f64,            // added to the running total
    pub running_total: f64,        // combined rating after this step
}

/// Result of one combination pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    pub combined: f64,
    pub steps: Vec<RatingStep>,
}

/// Combine ratings with the VA remaining-efficiency formula.
///
/// Conditions are applied highest percentage first; ties keep their input
/// order. Each condition takes its share of what remains after the previous
/// ones, so `combined` can only approach 100. No rounding happens here.
pub fn combine(conditions: &[RatedCondition]) -> Combination {
    let mut ordered: Vec<&RatedCondition> = conditions.iter().collect();
    // sort_by is stable, which is what keeps ties in encounter order
    ordered.sort_by(|a, b| b.percentage().total_cmp(&a.percentage()));

    let mut combined = 0.0_f64;
    let mut steps = Vec::with_capacity(ordered.len());

    for condition in ordered {
        let percentage = condition.percentage();
        let remaining = 100.0 - combined;
        let increment = remaining * (percentage / 100.0);
        combined += increment;

        let description = render_step(
            condition.name(),
            condition.side(),
            percentage,
            remaining,
            increment,
            combined,
        );
        tracing::debug!("{}", description);

        steps.push(RatingStep {
            description,
            remaining_efficiency: remaining,
            condition_percentage: percentage,
            increment,
            running_total: combined,
        });
    }

    Combination { combined, steps }
}

/// Render a step as "<name>[ (<side>)]: <p>% of <r>% remaining → increment <x>% → combined <y>%".
pub fn render_step(
    name: &str,
    side: Side,
    percentage: f64,
    remaining: f64,
    increment: f64,
    combined: f64,
) -> String {
    let label = match side {
        Side::None => name.to_string(),
        side => format!("{} ({})", name, side),
    };
    format!(
        "{}: {}% of {}% remaining → increment {}% → combined {}%",
        label,
        format_percent(percentage),
        format_percent(remaining),
        format_percent(increment),
        format_percent(combined)
    )
}

/// Format a percentage with at most two decimals and no trailing zeros.
/// 30.0 -> "30", 56.1 -> "56.1", 49.6 -> "49.6", 12.345 -> "12.35"
pub fn format_percent(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
