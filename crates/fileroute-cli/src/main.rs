mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::analyze::OutputFormat;
use config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fileroute",
    version,
    about = "Split request paths between static files and application routes"
)]
struct Cli {
    /// Config file (default: ./fileroute.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate values against a constraint, at request time and at registration time
    Check {
        /// Constraint name (built-in or from the config file)
        #[arg(long, default_value = "file")]
        constraint: String,
        /// Values to test, e.g. `images/logo.png`
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Report route defaults and literal routes that constraints cannot tell apart
    Analyze {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show where each request path would be dispatched
    Resolve {
        /// Request paths, e.g. `/css/site.css`
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };

    let result = config.and_then(|config| match cli.command {
        Commands::Check { constraint, values } => {
            commands::check::run(&config, &constraint, &values)
        }
        Commands::Analyze { format } => commands::analyze::run(&config, format),
        Commands::Resolve { paths } => commands::resolve::run(&config, &paths),
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
