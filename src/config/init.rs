use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, ColorMode, Config, OutputFormat};

/// Prompt user with a message and return their trimmed input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = prompt(input, output, &format!("{} [{}]: ", message, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, output, &format!("{} [{}]: ", message, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

/// Ask the config questions and return the resulting config.
///
/// Invalid answers are re-asked. End of input accepts the default.
pub fn prompt_config<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Config> {
    let defaults = Config::default();

    writeln!(
        output,
        "The bilateral factor adds 10% to the combined rating of conditions affecting both arms, both legs, or paired organs."
    )?;
    let apply_bilateral_factor = prompt_yes_no(
        input,
        output,
        "Apply the bilateral factor by default?",
        defaults.apply_bilateral_factor,
    )?;

    let format = loop {
        let answer = prompt_with_default(input, output, "Output format (text/json)", "text")?;
        match answer.to_lowercase().as_str() {
            "text" => break OutputFormat::Text,
            "json" => break OutputFormat::Json,
            _ => writeln!(output, "  Invalid: expected 'text' or 'json'. Try again.")?,
        }
    };

    let color = loop {
        let answer =
            prompt_with_default(input, output, "Color output (auto/always/never)", "auto")?;
        match answer.to_lowercase().as_str() {
            "auto" => break ColorMode::Auto,
            "always" => break ColorMode::Always,
            "never" => break ColorMode::Never,
            _ => writeln!(
                output,
                "  Invalid: expected 'auto', 'always' or 'never'. Try again."
            )?,
        }
    };

    Ok(Config {
        apply_bilateral_factor,
        format,
        color,
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    writeln!(output, "VA Rating Configuration")?;
    writeln!(output, "=======================")?;
    writeln!(output)?;

    let config = prompt_config(&mut input, &mut output)?;

    let path = match default_path {
        Some(p) => p,
        None => {
            let suggested = get_config_path()?;
            let answer = prompt_with_default(
                &mut input,
                &mut output,
                "Save config to",
                &suggested.display().to_string(),
            )?;
            PathBuf::from(answer)
        }
    };

    if path.exists()
        && !prompt_yes_no(
            &mut input,
            &mut output,
            &format!("{} exists. Overwrite?", path.display()),
            false,
        )?
    {
        writeln!(output, "Aborted; existing config left unchanged.")?;
        return Ok(());
    }

    save_config(&path, &config)?;
    writeln!(output, "Config written to {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str) -> (Config, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let config = prompt_config(&mut input, &mut output).unwrap();
        (config, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_all_defaults() {
        let (config, _) = run("\n\n\n");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_answers() {
        let (config, _) = run("n\njson\nnever\n");
        assert!(!config.apply_bilateral_factor);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_invalid_answer_reprompts() {
        let (config, output) = run("y\nxml\nTEXT\nalways\n");
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.color, ColorMode::Always);
        assert!(output.contains("Invalid: expected 'text' or 'json'"));
    }

    #[test]
    fn test_end_of_input_accepts_defaults() {
        let (config, _) = run("");
        assert_eq!(config, Config::default());
    }
}
