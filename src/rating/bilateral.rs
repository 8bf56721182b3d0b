use serde::Serialize;
use std::collections::BTreeMap;

use super::combine::{combine, format_percent, RatingStep};
use super::condition::{
    Condition, ExtremityGroup, RatedCondition, Side, SyntheticBilateralCondition,
};

/// Share of a bilateral group's combined rating added as the bilateral factor.
pub const BILATERAL_FACTOR: f64 = 0.10;

/// A bilateral-adjusted group value cannot exceed a total rating.
const MAX_RATING: f64 = 100.0;

/// Groups with at least one LEFT and one RIGHT member, keyed by group.
/// Each value holds every sided member of the group in input order.
pub type BilateralGroups<'a> = BTreeMap<ExtremityGroup, Vec<&'a Condition>>;

/// Per-group record of what the bilateral factor did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BilateralGroupSummary {
    pub group: ExtremityGroup,
    pub members: Vec<String>,
    pub pair_combined: f64,
    pub bilateral_increment: f64,
    pub rounded_increment: u32,
    pub adjusted_rating: f64,
}

/// Output of the injection stage.
#[derive(Debug, Clone, PartialEq)]
pub struct BilateralAdjustment {
    pub adjusted: Vec<RatedCondition>,
    pub steps: Vec<RatingStep>,
    pub notes: Vec<String>,
    pub groups: Vec<BilateralGroupSummary>,
}

/// Find extremity groups that contain both a LEFT and a RIGHT condition.
///
/// Unsided or ungrouped conditions are skipped. One-sided groups do not
/// qualify and are left out of the map entirely.
pub fn detect_bilateral_groups(conditions: &[Condition]) -> BilateralGroups<'_> {
    let mut by_group: BTreeMap<ExtremityGroup, Vec<&Condition>> = BTreeMap::new();
    for condition in conditions {
        if let Some(group) = condition.pairing_group() {
            by_group.entry(group).or_default().push(condition);
        }
    }

    by_group.retain(|_, members| {
        let has_left = members.iter().any(|c| c.side == Side::Left);
        let has_right = members.iter().any(|c| c.side == Side::Right);
        has_left && has_right
    });
    by_group
}

/// Replace each qualifying group's members with one synthetic condition.
///
/// The group is combined on its own, 10% of that value is added to it (added,
/// not combined) and the sum re-enters the final pass. Conditions outside any
/// qualifying group keep their input order and come first.
pub fn apply_bilateral_factor(
    conditions: &[Condition],
    groups: &BilateralGroups<'_>,
) -> BilateralAdjustment {
    let mut steps = Vec::new();
    let mut notes = Vec::new();
    let mut summaries = Vec::new();
    let mut synthetic = Vec::new();

    for (group, members) in groups {
        let rated: Vec<RatedCondition> = members.iter().map(|c| (*c).clone().into()).collect();
        let pass = combine(&rated);
        let pair_combined = pass.combined;
        let bilateral_increment = pair_combined * BILATERAL_FACTOR;
        let rounded_increment = round_half_up(bilateral_increment);
        let uncapped = pair_combined + bilateral_increment;
        let adjusted_rating = uncapped.min(MAX_RATING);

        steps.extend(pass.steps);
        let mut note = format!(
            "{} group ({}): combined {}% → bilateral factor +{}% (≈{}%) → {}%",
            group,
            describe_sides(members),
            format_percent(pair_combined),
            format_percent(bilateral_increment),
            rounded_increment,
            format_percent(adjusted_rating)
        );
        if uncapped > MAX_RATING {
            note.push_str(&format!(" (capped from {}%)", format_percent(uncapped)));
        }
        notes.push(note);
        tracing::debug!(
            "bilateral {}: {} members, pair {:.2}, increment {:.2}",
            group,
            members.len(),
            pair_combined,
            bilateral_increment
        );

        summaries.push(BilateralGroupSummary {
            group: *group,
            members: members.iter().map(|c| c.name.clone()).collect(),
            pair_combined,
            bilateral_increment,
            rounded_increment,
            adjusted_rating,
        });
        synthetic.push(RatedCondition::Synthetic(SyntheticBilateralCondition {
            name: format!("Bilateral {} (incl. factor)", group),
            group: *group,
            pair_combined,
            bilateral_increment,
            percentage: adjusted_rating,
        }));
    }

    let mut adjusted: Vec<RatedCondition> = conditions
        .iter()
        .filter(|c| !is_group_member(c, groups))
        .cloned()
        .map(RatedCondition::User)
        .collect();
    adjusted.extend(synthetic);

    BilateralAdjustment {
        adjusted,
        steps,
        notes,
        groups: summaries,
    }
}

fn is_group_member(condition: &Condition, groups: &BilateralGroups<'_>) -> bool {
    condition
        .pairing_group()
        .is_some_and(|group| groups.contains_key(&group))
}

/// "LEFT + RIGHT", or "2 LEFT + 1 RIGHT" when a side has several entries.
fn describe_sides(members: &[&Condition]) -> String {
    let left = members.iter().filter(|c| c.side == Side::Left).count();
    let right = members.iter().filter(|c| c.side == Side::Right).count();
    if left == 1 && right == 1 {
        "LEFT + RIGHT".to_string()
    } else {
        format!("{} LEFT + {} RIGHT", left, right)
    }
}

/// Nearest integer, halves rounded up. Inputs are non-negative.
fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}
