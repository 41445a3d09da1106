use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sat_visibility::case::TestCase;
use sat_visibility::compare::compare_with_reference;
use sat_visibility::config::Config;
use sat_visibility::propagator::Sgp4Propagator;
use sat_visibility::runner::Runner;
use sat_visibility::visibility::RangeRateLookahead;

#[derive(Parser)]
#[command(name = "sat-visibility")]
#[command(about = "Satellite visibility window calculator")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    test_data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,
    #[arg(long, global = true, value_enum)]
    range_rate_lookahead: Option<RangeRateLookahead>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one test case by name, or every case in the test data directory
    Run { case: Option<String> },
    /// Check a test case file without propagating
    Validate { file: PathBuf },
    /// Compare window counts with reference results
    Compare {
        #[arg(long)]
        reference_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Run { case } => run(config, case.as_deref()),
        Commands::Validate { file } => validate(&file),
        Commands::Compare { reference_dir } => {
            let reference_dir = reference_dir.unwrap_or_else(|| config.reference_dir());
            compare(&config, &reference_dir)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.test_data_dir {
        config.test_data_dir = dir.clone();
    }
    if let Some(dir) = &cli.results_dir {
        config.results_dir = dir.clone();
    }
    if let Some(lookahead) = cli.range_rate_lookahead {
        config.range_rate_lookahead = lookahead;
    }
    Ok(config)
}

fn run(config: Config, case: Option<&str>) -> ExitCode {
    let runner = Runner::new(config);
    println!(
        "{} v{}",
        runner.config().implementation,
        runner.config().version
    );

    match runner.run(case) {
        Ok(summaries) => {
            for summary in &summaries {
                println!(
                    "  ✓ {}: {} window(s) in {:.3}s -> {}",
                    summary.test_case,
                    summary.window_count,
                    summary.execution_time.as_secs_f64(),
                    summary.output_file.display()
                );
            }
            println!("Completed {} test case(s)", summaries.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    let case = match TestCase::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let range = match case.time_range() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid test case: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let propagator = match Sgp4Propagator::from_tle_lines(&case.satellite.tle) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid satellite: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Test case {} is valid", case.name);
    println!(
        "  satellite: {} (NORAD {}), epoch {}",
        propagator.object_name().unwrap_or("unnamed"),
        propagator.norad_id(),
        propagator.epoch()
    );
    println!(
        "  observer: {:.4}°, {:.4}°, {} m",
        case.observer.latitude, case.observer.longitude, case.observer.altitude
    );
    println!(
        "  window: {} to {} every {}",
        range.start,
        range.end,
        humantime::format_duration(range.step.to_std().unwrap_or_default())
    );
    println!("  minimum elevation: {}°", case.min_elevation);
    ExitCode::SUCCESS
}

fn compare(config: &Config, reference_dir: &Path) -> ExitCode {
    let comparison =
        match compare_with_reference(&config.results_dir, reference_dir, &config.implementation) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };

    for entry in &comparison.entries {
        match entry.reference_windows {
            Some(reference) => println!(
                "  {} {}: {} vs {} window(s)",
                if entry.matches() { "✓" } else { "✗" },
                entry.test_case,
                entry.result_windows,
                reference
            ),
            None => println!(
                "  ✗ {}: {} window(s), no reference result",
                entry.test_case, entry.result_windows
            ),
        }
    }
    println!(
        "{}/{} test cases match the reference",
        comparison.matched(),
        comparison.total()
    );

    if comparison.all_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
