use cc_latest::commands::latest::latest_command;
use cc_latest::commands::show::{show_command, ShowOptions};
use cc_latest::commands::sources::sources_command;
use cc_latest::commands::status::status_command;
use cc_latest::render::OutputFormat;
use cc_latest::{Config, Fetcher, Registry};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cc-latest")]
#[command(about = "Fetch the latest changelog entries of AI coding assistants", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    show: ShowArgs,

    /// TOML config file (HTTP settings, recent window, extra sources)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show cc-latest version
    #[arg(short = 'v', long = "self-version", action = ArgAction::Version)]
    self_version: Option<bool>,
}

#[derive(Args)]
struct ShowArgs {
    /// Source to show (see `cc-latest sources`)
    #[arg(default_value = "claude")]
    source: String,

    /// Output as JSON
    #[arg(long, conflicts_with = "md")]
    json: bool,

    /// Output as markdown
    #[arg(long)]
    md: bool,

    /// List all available versions
    #[arg(long)]
    list: bool,

    /// Fetch a specific version (e.g. 2.0.70)
    #[arg(long = "version", value_name = "VERSION", conflicts_with = "list")]
    target_version: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Releases from every tool published in the recent window
    Latest {
        /// Output as JSON
        #[arg(long, conflicts_with = "md")]
        json: bool,

        /// Output as markdown
        #[arg(long)]
        md: bool,
    },

    /// Latest version, freshness and release cadence of every tool
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known sources
    Sources,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let registry = Registry::with_overrides(&config.sources)?;
    let fetcher = Fetcher::new(&config.http)?;

    match cli.command {
        Some(Commands::Latest { json, md }) => {
            latest_command(
                &registry,
                &fetcher,
                &config.aggregate,
                OutputFormat::from_flags(json, md),
                Utc::now(),
            )
            .await
        }
        Some(Commands::Status { json }) => {
            status_command(&registry, &fetcher, &config.aggregate, json, Utc::now()).await
        }
        Some(Commands::Sources) => Ok(sources_command(&registry)),
        None => {
            let options = ShowOptions {
                source: cli.show.source,
                format: OutputFormat::from_flags(cli.show.json, cli.show.md),
                list: cli.show.list,
                version: cli.show.target_version,
            };
            show_command(&registry, &fetcher, &options).await
        }
    }
}
