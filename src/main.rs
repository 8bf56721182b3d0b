use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use va_rating::config::{ColorMode, OutputFormat};
use va_rating::rating::Condition;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 3;
const EXIT_IO: i32 = 4;
const EXIT_INTERNAL: i32 = 70;

#[derive(Args, Debug)]
struct CalcArgs {
    /// Conditions file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Inline condition as NAME:PERCENT[:SIDE[:GROUP]], e.g. "Left knee:30:left:leg"
    #[arg(short = 'C', long = "condition", value_name = "SPEC")]
    conditions: Vec<String>,

    /// Do not apply the bilateral factor, even when paired conditions exist
    #[arg(long)]
    no_bilateral: bool,

    /// Output format (defaults to the config value)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// When to use colors in text output (defaults to the config value)
    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    /// Also write the JSON result to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate a combined rating (default if no subcommand)
    Calc(CalcArgs),
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "va-rating")]
#[command(about = "VA combined disability rating calculator", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/va-rating/config.yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(flatten)]
    calc: CalcArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "va_rating=debug" } else { "va_rating=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let command = cli.command.unwrap_or(Commands::Calc(cli.calc));

    match command {
        Commands::Init => {
            if let Err(e) = va_rating::config::init::run_init_wizard(config_path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Calc(args) => run_calc(args, config_path, cli.verbose),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_calc(args: CalcArgs, config_path: Option<PathBuf>, verbose: bool) {
    let start_time = Instant::now();

    let config = match va_rating::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut conditions: Vec<Condition> = Vec::new();
    let mut file_bilateral = None;

    if let Some(ref path) = args.file {
        match va_rating::input::load_conditions_file(path) {
            Ok(doc) => {
                tracing::debug!(
                    "Loaded {} conditions from {}",
                    doc.conditions.len(),
                    path.display()
                );
                file_bilateral = doc.apply_bilateral_factor;
                conditions.extend(doc.conditions);
            }
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
    }

    for inline in &args.conditions {
        match va_rating::input::parse_inline_condition(inline) {
            Ok(c) => conditions.push(c),
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
    }

    // --no-bilateral wins over the conditions file, which wins over config
    let apply_bilateral = !args.no_bilateral
        && file_bilateral.unwrap_or(config.apply_bilateral_factor);

    if verbose {
        eprintln!("Conditions ({}):", conditions.len());
        eprintln!(
            "{}",
            va_rating::output::format_condition_list(&conditions, false)
        );
        eprintln!(
            "Bilateral factor: {}",
            if apply_bilateral { "enabled" } else { "disabled" }
        );
        eprintln!();
    }

    let result = match va_rating::rating::calculate_combined_rating(&conditions, apply_bilateral) {
        Ok(r) => r,
        Err(e) if e.is_input_error() => {
            eprintln!(
                "Invalid condition ({}): {}",
                e.field().unwrap_or("input"),
                e
            );
            std::process::exit(EXIT_INPUT);
        }
        Err(e) => {
            tracing::error!("Rating engine failure: {}", e);
            eprintln!("Internal error: {}", e);
            std::process::exit(EXIT_INTERNAL);
        }
    };

    let format = args.format.unwrap_or(config.format);
    match format {
        OutputFormat::Text => {
            let use_colors = args
                .color
                .unwrap_or(config.color)
                .enabled(va_rating::output::should_use_colors());
            println!(
                "{}",
                va_rating::output::format_result_text(&result, use_colors)
            );
        }
        OutputFormat::Json => match va_rating::output::format_result_json(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_INTERNAL);
            }
        },
    }

    if let Some(ref path) = args.output {
        if let Err(e) = va_rating::output::save_result_json(path, &result) {
            eprintln!("Failed to write result: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        if verbose {
            eprintln!("Result written to {}", path.display());
        }
    }

    if verbose {
        eprintln!();
        eprintln!("Done in {:?}", start_time.elapsed());
    }
}
