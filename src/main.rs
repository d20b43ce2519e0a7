//! qs-trends - Main entry point
//!
//! Reads raw quality score records from JSON and prints per-entity trends.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qs_trends::{
    config::Config,
    display::{
        display_entity_table, display_series, display_summary, print_section,
        print_section_simple,
    },
    error::Result,
    input, pipeline, WindowPreset,
};

#[derive(Parser)]
#[command(name = "qs-trends")]
#[command(author, version, about = "Quality score trends for advertising accounts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show quality score trends for the entities in a JSON file
    Report {
        /// JSON file with score records
        input: PathBuf,

        /// Window: 7, 30, 90, 365 or week, month, quarter, year
        #[arg(short, long)]
        window: Option<WindowPreset>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        now: Option<NaiveDate>,

        /// Print a bar chart for each entity
        #[arg(long)]
        chart: bool,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of entities to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show or edit configuration
    Config {
        /// Print current configuration
        #[arg(long)]
        show: bool,

        /// Create default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };
    config.validate()?;

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&config.general.log_level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Report {
            input,
            window,
            now,
            chart,
            json,
            limit,
        } => {
            let preset = match window {
                Some(preset) => preset,
                None => config.window_preset()?,
            };
            let now = now.unwrap_or_else(|| Local::now().date_naive());
            let limit = limit.unwrap_or(config.report.limit);
            run_report(&config, &input, preset, now, chart || config.report.chart, json, limit)
        }

        Commands::Config { show, init } => {
            if init {
                let default_config = Config::default();
                default_config.save()?;
                println!(
                    "Created default configuration at {}",
                    Config::config_path()?.display()
                );
            } else if show {
                let contents = toml::to_string_pretty(&config)?;
                println!("{contents}");
            } else {
                println!("Configuration path: {}", Config::config_path()?.display());
            }
            Ok(())
        }
    }
}

#[allow(clippy::fn_params_excessive_bools)]
fn run_report(
    config: &Config,
    input_path: &Path,
    preset: WindowPreset,
    now: NaiveDate,
    chart: bool,
    json: bool,
    limit: usize,
) -> Result<()> {
    let window = preset.window(now)?;
    let entities = input::load(input_path)?;

    let mut reports = pipeline::build_reports(&entities, &window);
    if limit > 0 {
        reports.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    print_section(&format!(
        "QUALITY SCORE - {}",
        preset.display_name().to_uppercase()
    ));
    println!("  {window} [{}]", window.granularity());

    if reports.is_empty() {
        println!("\nNo entities found in {}.", input_path.display());
        return Ok(());
    }

    print_section_simple("ENTITIES");
    display_entity_table(&reports);

    if chart {
        for report in &reports {
            print_section_simple(&format!("{} ({})", report.name, report.level));
            display_series(&report.trend.series, config.report.bar_width);
            println!();
            display_summary(&report.trend.summary);
        }
    }

    println!();
    Ok(())
}
