// LootSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (before logging, since it may set the level)
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the extractor or the analyzer
//
// Every failure is reported on stdout and the process exits normally;
// there is no exit-code contract beyond clap's own usage errors.

mod gui;

pub use lootsleuth::app;
pub use lootsleuth::core;
pub use lootsleuth::platform;
pub use lootsleuth::ui;
pub use lootsleuth::util;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// LootSleuth - loot extraction and rarity charts for per-character game logs.
///
/// `extract` scans a log directory and writes a Character,Date,Line CSV;
/// `analyze` charts that CSV by item and rarity.
#[derive(Parser, Debug)]
#[command(name = "LootSleuth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Alternate config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan log files for loot messages and write the CSV.
    Extract(ExtractArgs),
    /// Chart a loot CSV by item and rarity.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Directory containing the per-character log files.
    #[arg(short = 'l', long = "logs")]
    log_dir: Option<PathBuf>,

    /// CSV file to write (overwritten).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Target phrase (repeatable). Replaces the configured list when given.
    #[arg(short = 'p', long = "phrase")]
    phrases: Vec<String>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// CSV file to analyse.
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Print the aggregate table instead of opening the chart window.
    #[arg(long = "no-window")]
    no_window: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) =
        platform::config::load_config(cli.config.as_deref(), &platform_paths);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LootSleuth starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    match cli.command {
        Command::Extract(args) => run_extract(&config, args),
        Command::Analyze(args) => run_analyze(&config, args),
    }
}

fn run_extract(config: &platform::config::AppConfig, args: ExtractArgs) {
    let mut extract = app::extract::ExtractConfig::from(config);
    if let Some(dir) = args.log_dir {
        extract.log_dir = dir;
    }
    if let Some(output) = args.output {
        extract.output_csv = output;
    }
    if !args.phrases.is_empty() {
        extract.phrases = args.phrases;
    }

    let result = app::extract::run_extraction_with(&extract, |skipped| {
        println!("{}", skipped.warning());
    });
    match result {
        Ok(report) => print!("{}", app::extract::format_summary(&report)),
        Err(e) => {
            tracing::error!(error = %e, "Extraction aborted");
            println!("Error: {e}");
        }
    }
}

fn run_analyze(config: &platform::config::AppConfig, args: AnalyzeArgs) {
    let mut analyze = app::analyze::AnalyzeConfig::from(config);
    if let Some(input) = args.input {
        analyze.input_csv = input;
    }

    let layout = match app::analyze::run_analysis(&analyze) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!(error = %e, "Analysis aborted");
            println!("An error occurred: {e}");
            return;
        }
    };

    if args.no_window {
        print!("{}", app::analyze::format_layout(&layout));
        return;
    }

    if let Err(e) = gui::show_chart(layout) {
        tracing::error!(error = %e, "Failed to open chart viewer");
        println!("An error occurred: failed to open chart window: {e}");
    }
}
