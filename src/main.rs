// DeliverySleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Evaluating the delivery log and writing the report

use clap::Parser;
use deliverysleuth::app::evaluator::LogEvaluator;
use deliverysleuth::core::evaluate::EvaluateConfig;
use deliverysleuth::core::export::{self, OutputFormat};
use deliverysleuth::platform::config::{self, PlatformPaths};
use deliverysleuth::util::{self, error::DeliverySleuthError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// DeliverySleuth - delivery log evaluator.
///
/// Reads a delivery log (one `<date>T<time> <expected date> <start>-<end>`
/// record per line) and reports, per expected date, how many deliveries were
/// early, early on time, late on time, and late.
#[derive(Parser, Debug)]
#[command(name = "DeliverySleuth", version, about)]
struct Cli {
    /// Delivery log file to evaluate.
    path: PathBuf,

    /// Report format: json, csv or text.
    #[arg(short = 'f', long = "format")]
    format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Config file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long = "compact")]
    compact: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::debug!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "DeliverySleuth starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    if let Err(e) = run(&cli, &app_config) {
        tracing::error!(error = %e, "Evaluation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, app_config: &config::AppConfig) -> util::error::Result<()> {
    let evaluator = LogEvaluator::new(EvaluateConfig {
        max_logged_invalid_lines: app_config.max_logged_invalid_lines,
    });
    let result = evaluator.evaluate_log_file(&cli.path)?;

    let format = cli.format.unwrap_or(app_config.output_format);
    let pretty = app_config.pretty_json && !cli.compact;

    match &cli.output {
        Some(out_path) => {
            let file = File::create(out_path).map_err(|source| DeliverySleuthError::Io {
                path: out_path.clone(),
                operation: "create report",
                source,
            })?;
            write_report(&result, format, BufWriter::new(file), out_path, pretty)?;
            tracing::info!(path = %out_path.display(), format = format.label(), "Report written");
        }
        None => {
            let stdout = io::stdout();
            write_report(&result, format, stdout.lock(), Path::new("<stdout>"), pretty)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    result: &deliverysleuth::core::model::EvaluationResult,
    format: OutputFormat,
    mut writer: W,
    path: &Path,
    pretty: bool,
) -> util::error::Result<()> {
    export::export(result, format, &mut writer, path, pretty)?;
    writer.flush().map_err(|source| DeliverySleuthError::Io {
        path: path.to_path_buf(),
        operation: "flush report",
        source,
    })?;
    Ok(())
}
