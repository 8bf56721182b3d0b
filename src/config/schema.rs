use serde::{Deserialize, Serialize};

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// apply_bilateral_factor: true
/// format: text
/// color: auto
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Apply the bilateral factor when paired conditions are present (default: true)
    #[serde(default = "default_apply_bilateral_factor")]
    pub apply_bilateral_factor: bool,

    /// Output format when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,

    /// When to color text output
    #[serde(default)]
    pub color: ColorMode,
}

fn default_apply_bilateral_factor() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apply_bilateral_factor: default_apply_bilateral_factor(),
            format: OutputFormat::default(),
            color: ColorMode::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether stdout is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}
