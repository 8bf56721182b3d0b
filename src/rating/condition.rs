use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the body a condition affects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Left,
    Right,
    #[default]
    None,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
            Side::None => "NONE",
        };
        f.write_str(s)
    }
}

/// Paired body part classification used for bilateral pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExtremityGroup {
    Arm,
    Leg,
    Organ,
}

impl fmt::Display for ExtremityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtremityGroup::Arm => "ARM",
            ExtremityGroup::Leg => "LEG",
            ExtremityGroup::Organ => "ORGAN",
        };
        f.write_str(s)
    }
}

/// A single rated disability as supplied by the caller.
///
/// `percentage` is deliberately signed and unbounded here; range checks happen
/// in [`crate::rating::validate_conditions`] so bad input is rejected, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub name: String,
    pub percentage: i32,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub extremity_group: Option<ExtremityGroup>,
}

impl Condition {
    /// Non-bilateral condition.
    pub fn new(name: impl Into<String>, percentage: i32) -> Self {
        Self {
            name: name.into(),
            percentage,
            side: Side::None,
            extremity_group: None,
        }
    }

    /// Condition on one side of a paired extremity.
    pub fn sided(
        name: impl Into<String>,
        percentage: i32,
        side: Side,
        extremity_group: ExtremityGroup,
    ) -> Self {
        Self {
            name: name.into(),
            percentage,
            side,
            extremity_group: Some(extremity_group),
        }
    }

    /// Group this condition can pair within, if any. `Side::None` never pairs.
    pub fn pairing_group(&self) -> Option<ExtremityGroup> {
        match self.side {
            Side::None => None,
            Side::Left | Side::Right => self.extremity_group,
        }
    }
}

/// Value derived from a bilateral group, fed back into the final combination pass.
///
/// `percentage` is the group's sub-combined rating plus its bilateral
/// increment. It is carried unrounded so no precision is lost before the
/// final output stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticBilateralCondition {
    pub name: String,
    pub group: ExtremityGroup,
    pub pair_combined: f64,
    pub bilateral_increment: f64,
    pub percentage: f64,
}

/// Entry in a combination pass, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RatedCondition {
    User(Condition),
    Synthetic(SyntheticBilateralCondition),
}

impl RatedCondition {
    pub fn name(&self) -> &str {
        match self {
            RatedCondition::User(c) => &c.name,
            RatedCondition::Synthetic(s) => &s.name,
        }
    }

    pub fn percentage(&self) -> f64 {
        match self {
            RatedCondition::User(c) => f64::from(c.percentage),
            RatedCondition::Synthetic(s) => s.percentage,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            RatedCondition::User(c) => c.side,
            RatedCondition::Synthetic(_) => Side::None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, RatedCondition::Synthetic(_))
    }
}

impl From<Condition> for RatedCondition {
    fn from(condition: Condition) -> Self {
        RatedCondition::User(condition)
    }
}
