use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::Style;

use vdotrs::error::ErrorSeverity;
use vdotrs::export::csv::write_rows;
use vdotrs::export::export_personal_bests;
use vdotrs::specialty::{load_events, personal_bests};
use vdotrs::training_log::workouts_in_month;
use vdotrs::{
    export_report, export_report_to_file, init_logging, AppConfig, EventName, ExportFormat,
    InMemoryStore, LogLevel, MonthlyMileage, PerformanceRecord, ReportContent, SpecialtyEvent,
    VdotEngine, VdotError, VdotService, Workout,
};

/// vdotrs - VDOT Running Calculator
///
/// Estimates VDOT from a race performance and derives Daniels training paces
/// and Riegel race-time predictions.
#[derive(Parser)]
#[command(name = "vdotrs")]
#[command(author = "vdotrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "VDOT running calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Report format (json, csv, text); defaults to the configured format
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate VDOT, training paces and race predictions for one performance
    Calculate {
        /// Distance covered
        #[arg(short, long)]
        distance: f64,

        /// Distance unit (km, mile, m)
        #[arg(short, long, default_value = "km")]
        unit: String,

        /// Finishing time, HH:MM:SS
        #[arg(short, long)]
        time: String,

        /// Course elevation in meters
        #[arg(long)]
        elevation: Option<f64>,

        /// Temperature in °C
        #[arg(long)]
        temperature: Option<f64>,
    },

    /// Report on a user's stored performance record
    Report {
        /// User ID
        #[arg(short, long)]
        user: u64,

        /// Records file (JSON array); defaults to the configured records file
        #[arg(short, long)]
        records: Option<PathBuf>,
    },

    /// Analyze a personal best, or list a user's stored personal bests
    Event {
        /// Event name (800m, 1500m, 1mile, 3000m, 3000mSC, 2mile, 5000m, 10000m, half, marathon)
        #[arg(short, long, required_unless_present = "user")]
        name: Option<String>,

        /// Best time, h:mm:ss or m'ss"SS
        #[arg(short, long, required_unless_present = "user")]
        time: Option<String>,

        /// Date the best time was set (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// List this user's personal bests from the events file
        #[arg(short, long, conflicts_with_all = ["name", "time", "date"])]
        user: Option<u64>,

        /// Events file (JSON array); defaults to the configured events file
        #[arg(short, long, requires = "user")]
        events: Option<PathBuf>,
    },

    /// Summarize logged workouts for one month
    Mileage {
        /// Calendar year
        #[arg(short, long)]
        year: i32,

        /// Calendar month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Only count workouts for this user
        #[arg(long)]
        user: Option<u64>,

        /// Workouts file (JSON array); defaults to the configured workouts file
        #[arg(short, long)]
        workouts: Option<PathBuf>,
    },

    /// Configure application settings
    Config {
        /// Show the effective configuration
        #[arg(short, long)]
        list: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref());

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&log_config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = match &cli.format {
        Some(value) => value.parse::<ExportFormat>()?,
        None => config.output.default_format,
    };

    if let Err(err) = run(&cli, &config, format) {
        report_failure(&err, format);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli, config: &AppConfig, format: ExportFormat) -> Result<()> {
    match &cli.command {
        Commands::Calculate {
            distance,
            unit,
            time,
            elevation,
            temperature,
        } => {
            eprintln!("{}", "Calculating VDOT...".blue().bold());
            let record = PerformanceRecord::new(*distance, unit.as_str(), time.as_str())
                .with_conditions(*elevation, *temperature);
            let report = VdotEngine::analyze(&record)?;

            emit(&report, format, cli.output.as_deref())?;
            eprintln!("{}", format!("✓ VDOT {}", report.analysis.vdot).blue());
        }

        Commands::Report { user, records } => {
            let path = records.as_ref().unwrap_or(&config.data.records_file);
            eprintln!("{}", "Loading performance records...".green().bold());
            eprintln!("  File: {}", path.display());

            let service = VdotService::new(InMemoryStore::load_json(path)?);
            let report = service.user_vdot_value(*user)?;

            emit(&report, format, cli.output.as_deref())?;
            eprintln!("{}", "✓ Report completed".green());
        }

        Commands::Event {
            name,
            time,
            date,
            user,
            events,
        } => {
            if let Some(user_id) = user {
                let path = events.as_ref().unwrap_or(&config.data.events_file);
                eprintln!("{}", "Loading personal bests...".cyan().bold());
                eprintln!("  File: {}", path.display());

                let bests = personal_bests(&load_events(path)?, *user_id);
                let writer = output_writer(cli.output.as_deref())?;
                export_personal_bests(&bests, format, writer)?;
                eprintln!("{}", format!("✓ {} personal bests", bests.len()).cyan());
                return Ok(());
            }

            let (Some(name), Some(time)) = (name, time) else {
                bail!("--name and --time are required unless --user is given");
            };

            eprintln!("{}", "Analyzing specialty event...".cyan().bold());
            let event = SpecialtyEvent {
                id: None,
                user_id: 0,
                event_name: name.parse::<EventName>()?,
                best_time: time.clone(),
                recorded_at: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            };
            let report = event.report()?;

            emit(&report, format, cli.output.as_deref())?;
            eprintln!("{}", format!("✓ VDOT {}", report.analysis.vdot).cyan());
        }

        Commands::Mileage {
            year,
            month,
            user,
            workouts,
        } => {
            let path = workouts.as_ref().unwrap_or(&config.data.workouts_file);
            eprintln!("{}", "Summarizing mileage...".magenta().bold());
            eprintln!("  File: {}", path.display());

            let mut log = load_workouts(path)?;
            if let Some(user_id) = user {
                log.retain(|w| w.user_id == *user_id);
            }

            write_mileage(&log, *year, *month, format, cli.output.as_deref())?;
            eprintln!("{}", "✓ Summary completed".magenta());
        }

        Commands::Config { list, init } => {
            eprintln!("{}", "Managing configuration...".white().bold());
            let path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);

            if *init {
                if path.exists() {
                    bail!("Config file already exists: {}", path.display());
                }
                AppConfig::default().save_to_file(&path)?;
                eprintln!("{}", format!("✓ Wrote {}", path.display()).white());
            }

            if *list || !*init {
                println!("# {}", path.display());
                println!("{}", toml::to_string_pretty(config)?);
            }
        }
    }

    Ok(())
}

fn emit<R: ReportContent>(report: &R, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            export_report_to_file(report, format, path)?;
            eprintln!("  Output: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            export_report(report, format, stdout.lock())?;
        }
    }
    Ok(())
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(
            fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    })
}

fn load_workouts(path: &Path) -> Result<Vec<Workout>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workouts file: {}", path.display()))?;
    let workouts: Vec<Workout> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse workouts file: {}", path.display()))?;
    Ok(workouts)
}

fn write_mileage(
    log: &[Workout],
    year: i32,
    month: u32,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let summary = MonthlyMileage::from_workouts(log, year, month);
    let selected = workouts_in_month(log, year, month);

    let mut writer = output_writer(output)?;

    match format {
        ExportFormat::Json => {
            let payload = serde_json::json!({ "summary": summary, "workouts": selected });
            serde_json::to_writer_pretty(&mut writer, &payload)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => write_rows(&selected, writer)?,
        ExportFormat::Text => {
            writeln!(writer, "MILEAGE {:04}-{:02}", summary.year, summary.month)?;
            writeln!(writer, "Workouts: {}", summary.workout_count)?;
            writeln!(writer, "Active days: {}", summary.active_days)?;
            writeln!(writer, "Total: {:.1} km", summary.total_km)?;

            if !selected.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Date", "Start", "Workout", "Distance (km)", "Weather"]);
                for workout in &selected {
                    builder.push_record([
                        workout.date.format("%Y-%m-%d").to_string(),
                        workout.start_time.clone(),
                        workout.workout.clone(),
                        format!("{:.1}", workout.distance_km()),
                        workout.weather.clone(),
                    ]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                writeln!(writer, "{}", table)?;
            }
        }
    }

    Ok(())
}

fn report_failure(err: &anyhow::Error, format: ExportFormat) {
    let Some(vdot_err) = err.downcast_ref::<VdotError>() else {
        eprintln!("{} {:#}", "✗".red().bold(), err);
        return;
    };

    match vdot_err.severity() {
        ErrorSeverity::Error => tracing::error!(kind = %vdot_err.kind(), error = %vdot_err, "command failed"),
        ErrorSeverity::Warning => tracing::warn!(kind = %vdot_err.kind(), error = %vdot_err, "command rejected"),
    }

    if format == ExportFormat::Json {
        if let Ok(body) = serde_json::to_string_pretty(&vdot_err.to_response()) {
            println!("{}", body);
        }
    }
    eprintln!("{} {}", "✗".red().bold(), vdot_err.user_message());
}
