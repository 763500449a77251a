use std::path::PathBuf;

use clap::Parser;
use smartname_core::casing::CasingStyle;
use smartname_core::config::{self, Config};
use smartname_core::extract::ExtractSettings;
use smartname_core::gateway::OllamaGateway;
use smartname_core::rename::{FileOutcome, RenameOptions, Renamer};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "smartname",
    about = "Rename files after their content using a local Ollama model"
)]
#[command(version)]
struct Cli {
    /// Directory containing the files to rename.
    directory: PathBuf,

    /// Rename the files. Without this flag only a dry run is reported.
    #[arg(long)]
    execute: bool,

    /// Ollama model to use.
    #[arg(long)]
    model: Option<String>,

    /// Casing style for the new filenames.
    #[arg(long = "case", value_enum)]
    case: Option<CasingStyle>,

    /// Base URL of the Ollama server.
    #[arg(long)]
    endpoint: Option<String>,

    /// Seconds to wait for each suggestion.
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.directory.is_dir() {
        anyhow::bail!("Directory '{}' does not exist", cli.directory.display());
    }

    let config = load_config(cli.config.as_deref());
    let mut ollama = config.ollama.clone();
    if let Some(endpoint) = cli.endpoint {
        ollama.endpoint = endpoint;
    }
    if let Some(timeout) = cli.timeout {
        ollama.timeout_secs = timeout;
    }

    let options = RenameOptions {
        model: cli.model.unwrap_or_else(|| config.general.model.clone()),
        case: cli.case.unwrap_or(config.general.case),
        execute: cli.execute,
        extract: ExtractSettings::from(&config.general),
    };

    let mode = if options.execute { "EXECUTE" } else { "DRY RUN" };
    let directory = std::fs::canonicalize(&cli.directory).unwrap_or(cli.directory);
    println!("\nMode: {mode}");
    println!("Using model: {}", options.model);
    println!("Casing style: {}", options.case);
    println!("Directory: {}\n", directory.display());

    let renamer = Renamer::new(OllamaGateway::new(&ollama)?, options);
    let report = renamer.run_with(&directory, print_outcome)?;

    tracing::debug!(
        planned = report.planned(),
        renamed = report.renamed(),
        failed = report.failed(),
        skipped = report.skipped(),
        "batch finished"
    );
    println!("\nComplete! Mode: {mode}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Config {
    let path = path.map(PathBuf::from).unwrap_or_else(config::config_path);
    Config::load_from_path(&path).unwrap_or_else(|err| {
        tracing::warn!(%err, "using default configuration");
        Config::default()
    })
}

fn print_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Planned(plan) => println!("{plan}"),
        FileOutcome::Renamed(plan) => {
            println!("{plan}");
            println!("Renamed successfully!");
        }
        FileOutcome::RenameFailed { plan, error } => {
            println!("{plan}");
            println!("Error renaming: {error}");
        }
        FileOutcome::Skipped { path, reason } => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            println!("Skipping '{name}' - {reason}");
        }
    }
}
