use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rating::{Condition, ExtremityGroup, Side};

/// A conditions file.
///
/// Example YAML:
/// ```yaml
/// apply_bilateral_factor: true
/// conditions:
///   - { name: "PTSD", percentage: 50 }
///   - { name: "Left knee", percentage: 30, side: LEFT, extremity_group: LEG }
///   - { name: "Right knee", percentage: 20, side: RIGHT, extremity_group: LEG }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConditionsDocument {
    #[serde(default)]
    pub apply_bilateral_factor: Option<bool>,
    pub conditions: Vec<Condition>,
}

/// Load conditions from a YAML or JSON file, chosen by extension.
/// Accepts either a [`ConditionsDocument`] or a bare list of conditions.
pub fn load_conditions_file(path: &Path) -> Result<ConditionsDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read conditions file at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let document = if is_json {
        parse_json(&content)
    } else {
        parse_yaml(&content)
    };
    document.with_context(|| format!("Failed to parse conditions in {}", path.display()))
}

fn parse_json(content: &str) -> Result<ConditionsDocument> {
    match serde_json::from_str::<ConditionsDocument>(content) {
        Ok(doc) => Ok(doc),
        Err(doc_err) => match serde_json::from_str::<Vec<Condition>>(content) {
            Ok(conditions) => Ok(ConditionsDocument {
                apply_bilateral_factor: None,
                conditions,
            }),
            Err(_) => Err(doc_err.into()),
        },
    }
}

fn parse_yaml(content: &str) -> Result<ConditionsDocument> {
    match serde_saphyr::from_str::<ConditionsDocument>(content) {
        Ok(doc) => Ok(doc),
        Err(doc_err) => match serde_saphyr::from_str::<Vec<Condition>>(content) {
            Ok(conditions) => Ok(ConditionsDocument {
                apply_bilateral_factor: None,
                conditions,
            }),
            Err(_) => Err(doc_err.into()),
        },
    }
}

/// Parse an inline condition: `NAME:PERCENT[:SIDE[:GROUP]]`.
///
/// Side is `left`, `right` or `none` (also `l`/`r`/`n`); group is `arm`,
/// `leg`, `organ`, or `none`/empty. Both are case-insensitive. The percentage
/// is not range-checked here.
pub fn parse_inline_condition(s: &str) -> Result<Condition> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    if !(2..=4).contains(&parts.len()) {
        bail!("Expected NAME:PERCENT[:SIDE[:GROUP]], got '{}'", s);
    }

    let name = parts[0].to_string();
    let percentage: i32 = parts[1]
        .trim_end_matches('%')
        .parse()
        .with_context(|| format!("Invalid percentage '{}' in '{}'", parts[1], s))?;
    let side = match parts.get(2) {
        Some(side) => parse_side(side)?,
        None => Side::None,
    };
    let extremity_group = match parts.get(3) {
        Some(group) => parse_group(group)?,
        None => None,
    };

    Ok(Condition {
        name,
        percentage,
        side,
        extremity_group,
    })
}

fn parse_side(s: &str) -> Result<Side> {
    match s.to_ascii_lowercase().as_str() {
        "left" | "l" => Ok(Side::Left),
        "right" | "r" => Ok(Side::Right),
        "none" | "n" | "" => Ok(Side::None),
        other => bail!("Invalid side '{}': expected left, right or none", other),
    }
}

fn parse_group(s: &str) -> Result<Option<ExtremityGroup>> {
    match s.to_ascii_lowercase().as_str() {
        "arm" => Ok(Some(ExtremityGroup::Arm)),
        "leg" => Ok(Some(ExtremityGroup::Leg)),
        "organ" => Ok(Some(ExtremityGroup::Organ)),
        "none" | "" => Ok(None),
        other => bail!("Invalid extremity group '{}': expected arm, leg or organ", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_inline_name_and_percent() {
        let condition = parse_inline_condition("Tinnitus:10").unwrap();
        assert_eq!(condition, Condition::new("Tinnitus", 10));
    }

    #[test]
    fn test_parse_inline_full() {
        let condition = parse_inline_condition("Left knee:30:LEFT:leg").unwrap();
        assert_eq!(
            condition,
            Condition::sided("Left knee", 30, Side::Left, ExtremityGroup::Leg)
        );
    }

    #[test]
    fn test_parse_inline_short_side_and_percent_sign() {
        let condition = parse_inline_condition("Right wrist: 20% : r : arm").unwrap();
        assert_eq!(condition.percentage, 20);
        assert_eq!(condition.side, Side::Right);
        assert_eq!(condition.extremity_group, Some(ExtremityGroup::Arm));
    }

    #[test]
    fn test_parse_inline_keeps_out_of_range_for_engine() {
        let condition = parse_inline_condition("Back:150").unwrap();
        assert_eq!(condition.percentage, 150);
    }

    #[test]
    fn test_parse_inline_errors() {
        assert!(parse_inline_condition("Back").is_err());
        assert!(parse_inline_condition("Back:abc").is_err());
        assert!(parse_inline_condition("Back:10:up").is_err());
        assert!(parse_inline_condition("Back:10:left:head").is_err());
        assert!(parse_inline_condition("a:1:left:leg:extra").is_err());
    }

    #[test]
    fn test_load_yaml_document() {
        let path = env::temp_dir().join("va_rating_test_document.yaml");
        fs::write(
            &path,
            r#"
apply_bilateral_factor: false
conditions:
  - name: PTSD
    percentage: 50
  - name: Left knee
    percentage: 30
    side: LEFT
    extremity_group: LEG
"#,
        )
        .unwrap();

        let doc = load_conditions_file(&path).unwrap();
        assert_eq!(doc.apply_bilateral_factor, Some(false));
        assert_eq!(doc.conditions.len(), 2);
        assert_eq!(doc.conditions[1].side, Side::Left);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_json_bare_list() {
        let path = env::temp_dir().join("va_rating_test_list.json");
        fs::write(
            &path,
            r#"[{"name": "Back", "percentage": 20}, {"name": "Knee", "percentage": 10, "side": "RIGHT", "extremity_group": "LEG"}]"#,
        )
        .unwrap();

        let doc = load_conditions_file(&path).unwrap();
        assert!(doc.apply_bilateral_factor.is_none());
        assert_eq!(doc.conditions.len(), 2);
        assert_eq!(doc.conditions[1].extremity_group, Some(ExtremityGroup::Leg));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = env::temp_dir().join("va_rating_test_does_not_exist.yaml");
        let _ = fs::remove_file(&path);
        let err = load_conditions_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read conditions file"));
    }

    #[test]
    fn test_load_invalid_json() {
        let path = env::temp_dir().join("va_rating_test_invalid.json");
        fs::write(&path, r#"{"conditions": [{"name": "Back"}]}"#).unwrap();
        assert!(load_conditions_file(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
