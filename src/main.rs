use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nasacheck::probes::http::HttpProbe;
use nasacheck::registry::{self, Endpoint};
use nasacheck::report::{self, Palette};
use nasacheck::runner::{self, RunOutcome};
use nasacheck::storage;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_OUTPUT: &str = "nasa_api_status.json";

#[derive(Parser)]
#[command(
    name = "nasacheck",
    about = "Availability checker for the NASA Earth-science APIs",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every endpoint in the registry and write the results file
    Check(CheckArgs),

    /// List the configured endpoints without probing them
    List {
        /// Load endpoints from a TOML file instead of the built-in list
        #[arg(long)]
        registry: Option<PathBuf>,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Results file path
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Load endpoints from a TOML file instead of the built-in list
    #[arg(long)]
    registry: Option<PathBuf>,

    /// JSON output for machine parsing (suppresses the console report)
    #[arg(long)]
    json: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout belongs to the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Bare `nasacheck` behaves like `nasacheck check` with defaults.
    let command = cli.command.unwrap_or(Commands::Check(CheckArgs {
        timeout: DEFAULT_TIMEOUT_SECS,
        output: PathBuf::from(DEFAULT_OUTPUT),
        registry: None,
        json: false,
        no_color: false,
    }));

    match command {
        Commands::Check(args) => run_check(args).await,
        Commands::List { registry, json } => run_list(registry.as_deref(), json),
    }
}

async fn run_check(args: CheckArgs) -> ExitCode {
    let palette = if args.no_color {
        Palette::plain()
    } else {
        Palette::detect()
    };

    match check(&args, &palette).await {
        Ok(code) => code,
        Err(err) => {
            println!("{}", report::format_unexpected(&palette, &err));
            ExitCode::from(1)
        }
    }
}

async fn check(args: &CheckArgs, palette: &Palette) -> Result<ExitCode> {
    let endpoints = load_registry(args.registry.as_deref())?;
    tracing::info!(
        count = endpoints.len(),
        timeout_secs = args.timeout,
        "Starting availability check"
    );

    let probe = HttpProbe::new();
    let timeout = Duration::from_secs(args.timeout);
    let console = if args.json { None } else { Some(palette) };

    match runner::run(&probe, &endpoints, timeout, console).await {
        RunOutcome::Interrupted => {
            // In machine mode stdout stays reserved for the JSON document.
            if args.json {
                tracing::warn!("Testing interrupted by user");
            } else {
                println!("{}", report::format_interrupted(palette));
            }
            Ok(ExitCode::from(1))
        }
        RunOutcome::Completed(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", report::format_summary(palette, &summary));
            }

            // Persistence failures are reported but never change the exit code.
            match storage::save(&summary, &args.output) {
                Ok(()) => {
                    tracing::info!(path = %args.output.display(), "Results saved");
                    if !args.json {
                        let shown = args.output.display().to_string();
                        println!("{}", report::format_saved(palette, &shown));
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to save results");
                    if !args.json {
                        println!("{}", report::format_save_error(palette, &err));
                    }
                }
            }

            Ok(ExitCode::from(summary.exit_code()))
        }
    }
}

fn run_list(registry_path: Option<&Path>, json: bool) -> ExitCode {
    match list(registry_path, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let palette = Palette::detect();
            println!("{}", report::format_unexpected(&palette, &err));
            ExitCode::from(1)
        }
    }
}

fn list(registry_path: Option<&Path>, json: bool) -> Result<()> {
    let endpoints = load_registry(registry_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&endpoints)?);
    } else {
        println!("{:<28} | {:<55} | URL", "Name", "Description");
        println!("{:-<28}-|-{:-<55}-|-{:-<40}", "", "", "");
        for e in &endpoints {
            println!("{:<28} | {:<55} | {}", e.name, e.description, e.url);
        }
    }

    Ok(())
}

fn load_registry(path: Option<&Path>) -> Result<Vec<Endpoint>> {
    match path {
        Some(p) => {
            let endpoints = registry::load_file(p)?;
            tracing::info!(count = endpoints.len(), path = %p.display(), "Loaded registry file");
            Ok(endpoints)
        }
        None => Ok(registry::builtin()),
    }
}
