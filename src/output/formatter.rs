use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::rating::{CombinedRatingResult, Condition, Side};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the input conditions, one per line.
/// Format: "{name} | {percentage}% | {side} {group}"
pub fn format_condition_list(conditions: &[Condition], use_colors: bool) -> String {
    if conditions.is_empty() {
        return "No conditions provided.".to_string();
    }

    conditions
        .iter()
        .map(|c| format_condition_line(c, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_condition_line(condition: &Condition, use_colors: bool) -> String {
    let placement = match (condition.side, condition.extremity_group) {
        (Side::None, None) => String::new(),
        (Side::None, Some(group)) => format!(" | {}", group),
        (side, None) => format!(" | {}", side),
        (side, Some(group)) => format!(" | {} {}", side, group),
    };

    if use_colors {
        format!(
            "{} | {}{}",
            condition.name.bold(),
            format!("{}%", condition.percentage).cyan(),
            placement.dimmed()
        )
    } else {
        format!("{} | {}%{}", condition.name, condition.percentage, placement)
    }
}

/// Format a rating result as human-readable text: summary, steps, notes.
pub fn format_result_text(result: &CombinedRatingResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let rating = format!("{}%", result.rounded_combined_rating);
    let bilateral = if result.bilateral_applied {
        "applied"
    } else {
        "not applied"
    };

    if use_colors {
        lines.push(format!("Combined rating: {}", rating.bold().green()));
    } else {
        lines.push(format!("Combined rating: {}", rating));
    }
    lines.push(format!(
        "  True combined: {:.2}%",
        result.true_combined_rating
    ));
    lines.push(format!("  Bilateral factor: {}", bilateral));

    if !result.steps.is_empty() {
        lines.push(String::new());
        lines.push(section_heading("Steps:", use_colors));
        for (idx, step) in result.steps.iter().enumerate() {
            let index = format!("{:>3}.", idx + 1);
            if use_colors {
                lines.push(format!("{} {}", index.dimmed(), step));
            } else {
                lines.push(format!("{} {}", index, step));
            }
        }
    }

    if !result.notes.is_empty() {
        lines.push(String::new());
        lines.push(section_heading("Notes:", use_colors));
        for note in &result.notes {
            lines.push(format!("  - {}", note));
        }
    }

    lines.join("\n")
}

fn section_heading(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.underline().to_string()
    } else {
        title.to_string()
    }
}

/// Format a rating result as pretty-printed JSON.
pub fn format_result_json(result: &CombinedRatingResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize rating result")
}
